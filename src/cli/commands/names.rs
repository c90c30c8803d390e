//! cvrank names - display names matching a filter

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::ranking::recommended_names;

#[derive(Args, Debug)]
pub struct NamesArgs {
    /// Case-insensitive substring; empty lists every name
    #[arg(default_value = "")]
    pub filter: String,
}

pub fn run(ctx: &AppContext, args: &NamesArgs) -> Result<()> {
    let collection = ctx.store.load_all()?;
    let names = recommended_names(collection.records(), &args.filter);

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(serde_json::json!({
            "filter": args.filter,
            "names": names,
        }))),
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            if names.is_empty() {
                layout.push_line("No matching names");
            }
            for name in names {
                layout.bullet(name);
            }
            emit_human(layout);
            Ok(())
        }
    }
}
