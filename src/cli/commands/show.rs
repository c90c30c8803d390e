//! cvrank show - one stored record with its entity analysis

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::commands::report::{render_entities, render_evidence};
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::{CvError, Result};
use crate::storage::{Collection, LoadedRecord};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Record id
    pub id: u64,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let collection = ctx.store.load_all()?;
    let record = find_valid(&collection, args.id)?;
    debug!(id = record.id(), mode = ?ctx.output_format, "showing record");

    let entities = record.distinct_spans();
    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(serde_json::json!({
            "record": record,
            "entities": entities,
        }))),
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout.title(&format!("#{} {}", record.id(), record.display_name()));
            layout.kv("Uploaded", &record.uploaded_at_display());
            if let Some(source) = record.source_name() {
                layout.kv("Source", source);
            }
            render_evidence(&mut layout, record.score(), record.evidence());
            layout.blank();
            render_entities(&mut layout, &entities);
            emit_human(layout);
            Ok(())
        }
    }
}

/// Look up a readable record, reporting corrupt rows as corruption.
pub(crate) fn find_valid(collection: &Collection, id: u64) -> Result<&crate::core::Record> {
    match collection.find(id) {
        Some(LoadedRecord::Valid(record)) => Ok(record),
        Some(LoadedRecord::Corrupt(corrupt)) => Err(CvError::PersistenceCorruption {
            row: corrupt.row,
            reason: corrupt.reason.clone(),
        }),
        None => Err(CvError::RecordNotFound(id)),
    }
}
