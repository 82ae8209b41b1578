//! Command-line surface for the importer.
//!
//! The `import` subcommand is destructive, so it is gated behind a
//! confirmation prompt that only the exact literal `YES` passes. The three
//! outcomes stay distinguishable by exit status: cancellation and success
//! both exit zero, any pipeline or configuration error exits non-zero.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::error::{source::SourceError, ImportError};
use crate::import::{ImportPipeline, RunSummary};
use crate::source::ImportSource;
use crate::startup;

/// The literal an operator must type to let the teardown proceed.
pub const CONFIRM_TOKEN: &str = "YES";

#[derive(Parser)]
#[command(
    name = "cairn",
    version,
    about = "Rebuilds the postcode reference store from an ONS Postcode Directory extract"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Wipe the reference store and rebuild it from a directory extract.
    Import(ImportArgs),
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to the ONS Postcode Directory CSV.
    pub source: PathBuf,

    /// Directory holding the attribute documents (overrides IMPORT_DATA_DIR).
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the place files (overrides IMPORT_PLACES_DIR).
    #[arg(long)]
    pub places_dir: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub yes: bool,
}

/// Dispatches the parsed command line and maps the outcome to an exit code.
pub async fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Import(args) => import(args).await,
    }
}

async fn import(args: ImportArgs) -> ExitCode {
    // A missing source is fatal before anything else happens; the prompt
    // is never shown and the store is never touched.
    if !args.source.is_file() {
        report_error(&SourceError::Missing(args.source.clone()).into());
        return ExitCode::FAILURE;
    }

    if !args.yes {
        match prompt_confirmation() {
            Ok(true) => {}
            Ok(false) => {
                println!("Import cancelled; the store was not touched.");
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                report_error(&e.into());
                return ExitCode::FAILURE;
            }
        }
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            report_error(&e.into());
            return ExitCode::FAILURE;
        }
    };
    let db = match startup::connect_to_database(&config).await {
        Ok(db) => db,
        Err(e) => {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let source = ImportSource {
        postcodes: args.source,
        data_dir: args.data_dir.unwrap_or(config.data_dir),
        places_dir: args.places_dir.unwrap_or(config.places_dir),
    };

    let mut pipeline = ImportPipeline::new(&db, source);
    match pipeline.run().await {
        Ok(summary) => {
            report_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("Import failed during {}: {}", failure.stage, failure.source);
            for rollback in &failure.rollback_errors {
                eprintln!("  {rollback}");
            }
            ExitCode::FAILURE
        }
    }
}

fn prompt_confirmation() -> io::Result<bool> {
    println!(
        "Importing will wipe the current postcode reference store before \
         continuing. Type {CONFIRM_TOKEN} to continue."
    );
    print!("> ");
    io::stdout().flush()?;

    confirmed(&mut io::stdin().lock())
}

/// Reads one line and accepts only the exact confirmation literal.
///
/// Anything else cancels, including end of input and the lowercase forms.
fn confirmed(input: &mut impl BufRead) -> io::Result<bool> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;

    Ok(read > 0 && line.trim_end_matches(['\r', '\n']) == CONFIRM_TOKEN)
}

fn report_summary(summary: &RunSummary) {
    println!(
        "Finished import in {:.2?}: {} postcodes ({} geocoded), {} outcodes, \
         {} terminated postcodes",
        summary.elapsed,
        summary.postcodes_seeded,
        summary.postcodes_geocoded,
        summary.outcodes,
        summary.terminated_postcodes,
    );
}

fn report_error(error: &ImportError) {
    eprintln!("Import failed: {error}");
}
