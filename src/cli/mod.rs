//! Command-line surface for cvrank.

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "cvrank",
    version,
    about = "Score CV entity extractions and rank the stored results"
)]
pub struct Cli {
    /// Emit machine-readable JSON on stdout (same as --format json)
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the global and project files
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output format requested on the command line, if any.
    #[must_use]
    pub const fn output_format(&self) -> Option<OutputFormat> {
        if self.robot {
            Some(OutputFormat::Json)
        } else {
            self.format
        }
    }

    /// Whether errors and logs should be machine-readable.
    #[must_use]
    pub fn wants_json(&self) -> bool {
        self.output_format().is_some_and(OutputFormat::is_machine_readable)
            || std::env::var("CVRANK_ROBOT").is_ok_and(|v| {
                matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
            })
    }
}
