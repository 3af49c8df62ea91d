//! Quill CLI - AI writing studio engine.
//!
//! Provides commands for:
//! - `generate`: Request content from the generation backend
//! - `export`: Convert generated markdown into PDF/Word artifacts
//! - `history`: Inspect and manage the local generation history

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, GenerateArgs, HistoryCommand};
use output::Output;

/// Quill - AI writing studio engine.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Enable verbose output (show request and conversion logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate content from the backend.
    Generate(GenerateArgs),
    /// Export generated markdown to PDF or Word artifacts.
    Export(ExportArgs),
    /// Manage the local generation history.
    #[command(subcommand)]
    History(HistoryCommand),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(&output),
        Commands::Export(args) => args.execute(&output),
        Commands::History(cmd) => cmd.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
