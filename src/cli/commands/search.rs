//! cvrank search - entity lookup inside one stored record

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::report::SearchReport;
use crate::cli::commands::show::find_valid;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::{CvError, Result};
use crate::search::{SearchQuery, search_record};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Record id
    pub id: u64,

    /// Text to look for in the record's entities
    pub query: String,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let query = SearchQuery::new(&args.query)
        .ok_or_else(|| CvError::ValidationFailed("search query must not be empty".to_string()))?;
    let collection = ctx.store.load_all()?;
    let record = find_valid(&collection, args.id)?;
    let report = SearchReport::new(&query, &search_record(record, &query));

    match ctx.output_format {
        OutputFormat::Json => {
            let warning = report.warning();
            emit_json(&robot_ok(&report).with_warning(warning))
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            report.render(&mut layout);
            emit_human(layout);
            Ok(())
        }
    }
}
