//! Upload command - analyse an invoice PDF and store it.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use quotepilot_core::models::AiConfig;
use quotepilot_core::{
    AiExtractor, ExtractionOrchestrator, Invoice, InvoiceRepository, OpenAiBackend, PdfTextExtractor,
    UploadService, UploadedFile,
};

use super::{emit_json, format_yen, GlobalOptions, OutputFormat};

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// Invoice PDF to analyse
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip the completion service and use the offline rules only
    #[arg(long)]
    no_ai: bool,
}

pub async fn run(args: UploadArgs, global: &GlobalOptions) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = global.load_config()?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let file = UploadedFile::from_path(&args.input)?;
    info!("Uploading {} ({} bytes)", file.file_name, file.size());

    let ai = if args.no_ai { None } else { ai_extractor(&config.ai)? };
    let orchestrator = match ai {
        Some(ai) => ExtractionOrchestrator::new(PdfTextExtractor::new(), ai),
        None => ExtractionOrchestrator::without_ai(PdfTextExtractor::new()),
    };

    let store = global.open_store(&config)?;
    let service = UploadService::new(orchestrator, InvoiceRepository::new(store), config.upload.clone());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("Analysing {}...", file.file_name));

    let result = service.upload(&file).await;
    pb.finish_and_clear();
    let invoice = result?;

    match args.format {
        OutputFormat::Json => emit_json(&invoice, args.output.as_deref())?,
        OutputFormat::Text => print_summary(&invoice),
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Build the AI extractor, or `None` when the service is disabled or has no key.
fn ai_extractor(config: &AiConfig) -> anyhow::Result<Option<AiExtractor<OpenAiBackend>>> {
    if !config.enabled {
        debug!("AI analysis disabled by configuration");
        return Ok(None);
    }

    let Some(api_key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
        warn!("No API key configured; using offline extraction only");
        return Ok(None);
    };

    let backend = OpenAiBackend::new(&config.endpoint, api_key, config.timeout_secs)?;
    let extractor = AiExtractor::new(backend, &config.model)
        .with_max_tokens(config.max_tokens)
        .with_temperature(config.temperature);

    Ok(Some(extractor))
}

fn print_summary(invoice: &Invoice) {
    println!("{} Stored invoice {}", style("✓").green(), style(&invoice.id).bold());
    println!("  File:      {}", invoice.file_name);
    println!("  Company:   {}", invoice.company_name);
    println!(
        "  Category:  {}",
        invoice
            .business_category
            .map(|c| c.label())
            .unwrap_or("-")
    );
    println!("  Services:  {}", invoice.services.join(", "));
    println!("  Amount:    {}", format_yen(invoice.total_amount));
    if let Some(scope) = &invoice.project_scope {
        println!("  Scope:     {}", scope);
    }
    if let Some(timeline) = &invoice.timeline {
        println!("  Timeline:  {}", timeline);
    }
    if let Some(note) = &invoice.analysis_note {
        println!("  {} offline analysis: {}", style("!").yellow(), note);
    }
}
