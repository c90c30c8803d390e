//! cvrank ingest - score one extraction and add it to the store

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::commands::report::{SearchReport, render_entities, render_evidence};
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::core::{Extraction, IngestOutcome, LabeledSpan, Record};
use crate::error::Result;
use crate::scoring::ScoreEvidence;
use crate::search::{SearchQuery, search_record};

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Plain text extracted from the document
    #[arg(long, value_name = "FILE")]
    pub text: PathBuf,

    /// JSON list of [label, text] spans from the NER model
    #[arg(long, value_name = "FILE")]
    pub spans: PathBuf,

    /// Display name to use instead of the first person entity
    #[arg(long)]
    pub name: Option<String>,

    /// Original document name (defaults to the text file name)
    #[arg(long)]
    pub source: Option<String>,

    /// Search the new record's entities
    #[arg(long, value_name = "QUERY")]
    pub search: Option<String>,
}

#[derive(Serialize)]
struct IngestReport<'a> {
    persisted: bool,
    record: Option<&'a Record>,
    score: u64,
    evidence: ScoreEvidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<SearchReport<'a>>,
    entities: Vec<&'a LabeledSpan>,
}

pub fn run(ctx: &AppContext, args: &IngestArgs) -> Result<()> {
    let extraction = Extraction::from_files(&args.text, &args.spans);
    let outcome = IngestOutcome::from_extraction(&ctx.scorer, &ctx.naming, extraction);
    let warning = outcome.warning().map(str::to_owned);

    let record = match outcome {
        IngestOutcome::Scored(draft) => {
            let mut draft = draft;
            if let Some(name) = args.name.as_deref().filter(|n| !n.trim().is_empty()) {
                draft = draft.with_display_name(name);
            }
            if let Some(source) = args.source.clone().or_else(|| file_name(&args.text)) {
                draft = draft.with_source_name(source);
            }
            Some(ctx.store.append(draft)?)
        }
        IngestOutcome::Unavailable { reason } => {
            debug!(%reason, "nothing persisted");
            None
        }
    };

    let query = args.search.as_deref().and_then(SearchQuery::new);
    let search = match (&record, &query) {
        (Some(record), Some(query)) => {
            Some(SearchReport::new(query, &search_record(record, query)))
        }
        _ => None,
    };

    let report = IngestReport {
        persisted: record.is_some(),
        record: record.as_ref(),
        score: record.as_ref().map_or(0, Record::score),
        evidence: record
            .as_ref()
            .map_or_else(ScoreEvidence::default, |r| r.evidence().clone()),
        search,
        entities: record.as_ref().map(Record::distinct_spans).unwrap_or_default(),
    };

    match ctx.output_format {
        OutputFormat::Json => {
            let search_warning = report.search.as_ref().and_then(SearchReport::warning);
            let response = robot_ok(&report)
                .with_warning(warning.as_deref())
                .with_warning(search_warning);
            emit_json(&response)
        }
        OutputFormat::Human => {
            emit_human(render_human(&report, warning.as_deref()));
            Ok(())
        }
    }
}

fn render_human(report: &IngestReport<'_>, warning: Option<&str>) -> HumanLayout {
    let mut layout = HumanLayout::new();
    match report.record {
        Some(record) => {
            layout.title(&format!("Stored record #{}: {}", record.id(), record.display_name()));
        }
        None => {
            layout.title("Nothing stored");
        }
    }
    if let Some(warning) = warning {
        layout.warning(warning);
    }
    render_evidence(&mut layout, report.score, &report.evidence);
    if let Some(search) = &report.search {
        layout.blank();
        search.render(&mut layout);
    }
    if report.persisted {
        layout.blank();
        render_entities(&mut layout, &report.entities);
    }
    layout
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
