//! readme-sync CLI - keep a Confluence page region in sync with a README.
//!
//! Provides commands for:
//! - `sync`: Convert the markdown file and splice it into the page
//! - `render`: Print the storage-format output for a markdown file

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, SyncArgs};
use output::Output;

/// readme-sync - Markdown to Confluence page sync.
#[derive(Parser)]
#[command(name = "readme-sync", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync the markdown file into the Confluence page.
    Sync(SyncArgs),
    /// Print the Confluence storage format for a markdown file.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Sync(args) if args.verbose);

    // --verbose forces DEBUG, otherwise use RUST_LOG or default to INFO
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Sync(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
