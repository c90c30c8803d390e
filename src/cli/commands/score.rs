//! cvrank score - score a text file without storing it

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::report::render_evidence;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json, robot_ok};
use crate::error::{CvError, Result};
use crate::scoring::normalize_text;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Plain text extracted from the document
    #[arg(long, value_name = "FILE")]
    pub text: PathBuf,
}

pub fn run(ctx: &AppContext, args: &ScoreArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.text).map_err(|err| {
        CvError::ExtractionUnavailable(format!("read text {}: {err}", args.text.display()))
    })?;
    let result = ctx.scorer.score(&normalize_text(&raw));

    match ctx.output_format {
        OutputFormat::Json => emit_json(&robot_ok(&result)),
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            render_evidence(&mut layout, result.score, &result.evidence);
            emit_human(layout);
            Ok(())
        }
    }
}
