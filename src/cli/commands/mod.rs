//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod clear;
pub mod ingest;
pub mod list;
pub mod names;
pub mod report;
pub mod score;
pub mod search;
pub mod show;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Ingest(args) => ingest::run(ctx, args),
        Commands::Score(args) => score::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Names(args) => names::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Clear(args) => clear::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an extraction and store the result
    Ingest(ingest::IngestArgs),

    /// Score a text file without storing it
    Score(score::ScoreArgs),

    /// Ranked, filtered view of stored records
    List(list::ListArgs),

    /// Display names matching a filter
    Names(names::NamesArgs),

    /// Show one record and its entities
    Show(show::ShowArgs),

    /// Search the entities of one record
    Search(search::SearchArgs),

    /// Remove every stored record
    Clear(clear::ClearArgs),
}
