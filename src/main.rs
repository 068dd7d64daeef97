//! Searoute CLI - optimize and validate sea-only shipping routes.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Searoute - sea-only shipping route optimizer
#[derive(Parser, Debug)]
#[command(name = "searoute")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for an optimal sea route between two points
    Optimize(cli::optimize::OptimizeArgs),

    /// Check a saved route for land crossings
    Validate(cli::validate::ValidateArgs),

    /// Flood-fill a sea mask from deep-ocean seeds, turning unreachable
    /// water into land
    RefineMask(cli::refine_mask::RefineMaskArgs),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Optimize(args) => cli::optimize::execute(&args),
        Commands::Validate(args) => cli::validate::execute(&args),
        Commands::RefineMask(args) => cli::refine_mask::execute(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
