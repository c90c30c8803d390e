//! cvrank list - ranked view of stored records

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::commands::report::{InvalidRow, RecordRow};
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::ranking::{RankQuery, SortKey, View, view};
use crate::storage::Collection;
use crate::utils::format::{pluralize, truncate_string};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive substring of the display name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Exact display name to show (overrides --name)
    #[arg(long, value_name = "NAME")]
    pub select: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortKey::ScoreDesc)]
    pub sort: SortKey,
}

impl ListArgs {
    fn query(&self) -> RankQuery {
        RankQuery {
            name_filter: self.name.clone(),
            selected_name: self.select.clone().filter(|s| !s.is_empty()),
            sort: self.sort,
        }
    }
}

#[derive(Serialize)]
struct ListReport<'a> {
    total: usize,
    shown: usize,
    sort: SortKey,
    records: Vec<RecordRow<'a>>,
    invalid: Vec<InvalidRow<'a>>,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let collection = ctx.store.load_all()?;
    let query = args.query();
    let ranked = view(&collection, &query);
    debug!(total = ranked.total, shown = ranked.shown(), sort = %query.sort, "ranked view");

    match ctx.output_format {
        OutputFormat::Json => {
            let report = build_report(&collection, &ranked, query.sort);
            emit_json(&robot_ok(report))
        }
        OutputFormat::Human => {
            emit_human(render_human(&collection, &ranked));
            Ok(())
        }
    }
}

fn build_report<'a>(collection: &'a Collection, ranked: &View<'a>, sort: SortKey) -> ListReport<'a> {
    ListReport {
        total: ranked.total,
        shown: ranked.shown(),
        sort,
        records: ranked.records.iter().copied().map(RecordRow::from).collect(),
        invalid: collection.corrupt().map(InvalidRow::from).collect(),
    }
}

fn render_human(collection: &Collection, ranked: &View<'_>) -> HumanLayout {
    let mut layout = HumanLayout::new();
    if ranked.total == 0 {
        layout.push_line("No records stored");
        layout.blank();
        layout.push_line("Add one with: cvrank ingest --text FILE --spans FILE");
        return layout;
    }

    layout.push_line(format!(
        "{:>5} {:32} {:>6} {:19}",
        "ID", "NAME", "SCORE", "UPLOADED"
    ));
    layout.push_line("─".repeat(65));
    for record in &ranked.records {
        layout.push_line(format!(
            "{:>5} {:32} {:>6} {:19}",
            record.id(),
            truncate_string(record.display_name(), 32),
            record.score(),
            record.uploaded_at_display()
        ));
    }

    let invalid: Vec<_> = collection.corrupt().collect();
    if !invalid.is_empty() {
        layout.blank();
        layout.section("Invalid rows");
        for corrupt in invalid {
            layout.warning(&format!("row {}: {}", corrupt.row, corrupt.reason));
        }
    }

    layout.blank();
    layout.push_line(format!(
        "Showing {} of {} processed",
        ranked.shown(),
        pluralize(ranked.total, "record")
    ));
    layout
}
