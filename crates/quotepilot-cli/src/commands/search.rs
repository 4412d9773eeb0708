//! Search command - find companies to ask for a quote.

use clap::Args;
use console::style;

use quotepilot_core::matching::{RankedCompany, SearchOutcome};
use quotepilot_core::{ContactMethod, MatchingEngine, SearchQuery};

use super::{emit_json, GlobalOptions, OutputFormat};

/// Arguments for the search command.
///
/// When several criteria are given, `--invoice-id` wins over `--category`,
/// which wins over `--name`.
#[derive(Args)]
pub struct SearchArgs {
    /// Match companies serving this stored invoice's category
    #[arg(long)]
    invoice_id: Option<String>,

    /// Category label, e.g. "IT・システム開発"
    #[arg(long)]
    category: Option<String>,

    /// Substring of the company name
    #[arg(long)]
    name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

impl SearchArgs {
    fn query(&self) -> SearchQuery {
        SearchQuery {
            invoice_id: self.invoice_id.clone(),
            category: self.category.clone(),
            name: self.name.clone(),
        }
    }
}

pub async fn run(args: SearchArgs, global: &GlobalOptions) -> anyhow::Result<()> {
    let config = global.load_config()?;
    let store = global.open_store(&config)?;
    let engine = MatchingEngine::new(store);

    let Some(outcome) = engine.search(&args.query())? else {
        anyhow::bail!("Specify one of --invoice-id, --category or --name");
    };

    match args.format {
        OutputFormat::Json => emit_json(&outcome, None),
        OutputFormat::Text => {
            print_outcome(&outcome);
            Ok(())
        }
    }
}

fn print_outcome(outcome: &SearchOutcome) {
    println!(
        "{} {} found, {} contactable",
        style("ℹ").blue(),
        outcome.total_found,
        outcome.contactable_count
    );

    for ranked in &outcome.companies {
        print_company(ranked);
    }
}

fn print_company(ranked: &RankedCompany) {
    let company = &ranked.company;
    println!();
    println!("{} ({})", style(&company.name).bold(), company.id);
    if let Some(industry) = &company.industry {
        println!("  Industry:  {}", industry);
    }
    println!("  Contact:   {}", describe(&ranked.preferred_contact_method));
    println!("  Priority:  {}", ranked.contact_priority);
}

fn describe(method: &ContactMethod) -> String {
    match method {
        ContactMethod::Email { address, .. } => format!("email {}", address),
        ContactMethod::Form { form, .. } if form.is_quote_form => format!("quote form {}", form.url),
        ContactMethod::Form { form, .. } => format!("form {}", form.url),
        ContactMethod::Manual { .. } => "manual".to_string(),
    }
}
