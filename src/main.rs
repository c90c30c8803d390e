//! cvrank - CV entity scoring CLI
//!
//! Score NER output for uploaded CVs and rank the stored results.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cvrank::app::AppContext;
use cvrank::cli::Cli;
use cvrank::cli::output::robot_error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli, cli.wants_json());

    // Errors follow the configured output format once the context has loaded.
    let (json, result) = match AppContext::from_cli(&cli) {
        Ok(ctx) => (
            ctx.output_format.is_machine_readable(),
            cvrank::cli::commands::run(&ctx, &cli.command),
        ),
        Err(e) => (cli.wants_json(), Err(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                // Robot mode: JSON error output to stdout
                let payload = serde_json::to_string(&robot_error(&e)).unwrap_or_default();
                println!("{payload}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli, json: bool) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,cvrank=info",
        1 => "info,cvrank=debug",
        2 => "debug,cvrank=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
