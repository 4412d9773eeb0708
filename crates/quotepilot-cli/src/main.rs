//! CLI application for invoice analysis and quote-partner matching.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{companies, config, invoice, search, upload, GlobalOptions};

/// quotepilot - Analyse invoices and find companies to request quotes from
#[derive(Parser)]
#[command(name = "quotepilot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON store (overrides store.path)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse an invoice PDF and store the result
    Upload(upload::UploadArgs),

    /// Find contactable companies for an invoice, category or name
    Search(search::SearchArgs),

    /// Inspect stored invoices
    Invoice(invoice::InvoiceArgs),

    /// Manage the company catalogue
    Companies(companies::CompaniesArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let global = GlobalOptions {
        config: cli.config,
        store: cli.store,
    };

    match cli.command {
        Commands::Upload(args) => upload::run(args, &global).await,
        Commands::Search(args) => search::run(args, &global).await,
        Commands::Invoice(args) => invoice::run(args, &global).await,
        Commands::Companies(args) => companies::run(args, &global).await,
        Commands::Config(args) => config::run(args, &global).await,
    }
}
