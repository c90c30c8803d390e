//! cvrank clear - remove every stored record

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::{CvError, Result};
use crate::utils::format::pluralize;

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Confirm removal of all records
    #[arg(long)]
    pub yes: bool,
}

pub fn run(ctx: &AppContext, args: &ClearArgs) -> Result<()> {
    if !args.yes {
        return Err(CvError::ValidationFailed(
            "clear removes every record; pass --yes to confirm".to_string(),
        ));
    }

    let removed = ctx.store.clear()?;
    let warning = removed
        .is_none()
        .then_some("stored collection could not be decoded; row count unknown");

    match ctx.output_format {
        OutputFormat::Json => emit_json(
            &robot_ok(serde_json::json!({ "removed": removed })).with_warning(warning),
        ),
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            match removed {
                Some(count) => {
                    layout.push_line(format!("Cleared {}", pluralize(count, "stored row")))
                }
                None => layout.push_line("Cleared stored collection"),
            };
            if let Some(warning) = warning {
                layout.warning(warning);
            }
            emit_human(layout);
            Ok(())
        }
    }
}
