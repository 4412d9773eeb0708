//! Companies command - manage the partner catalogue.

use clap::{Args, Subcommand};
use console::style;

use quotepilot_core::matching::RankedCompany;
use quotepilot_core::store::seed;
use quotepilot_core::CompanyRepository;

use super::{emit_json, GlobalOptions};

/// Arguments for the companies command.
#[derive(Args)]
pub struct CompaniesArgs {
    #[command(subcommand)]
    command: CompaniesCommand,
}

#[derive(Subcommand)]
enum CompaniesCommand {
    /// Load the demo catalogue into an empty store
    Seed,

    /// List every company
    List,

    /// Show one company with its contact methods
    Show {
        /// Company id
        id: String,
    },
}

pub async fn run(args: CompaniesArgs, global: &GlobalOptions) -> anyhow::Result<()> {
    let config = global.load_config()?;
    let companies = CompanyRepository::new(global.open_store(&config)?);

    match args.command {
        CompaniesCommand::Seed => {
            let added = seed::seed_if_empty(&companies)?;
            if added == 0 {
                println!("{} Catalogue already populated, nothing added.", style("ℹ").blue());
            } else {
                println!("{} Added {} demo companies", style("✓").green(), added);
            }
            Ok(())
        }
        CompaniesCommand::List => {
            for company in companies.find_all()? {
                println!(
                    "{}  {}  {}",
                    company.id,
                    company.name,
                    company.industry.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        CompaniesCommand::Show { id } => {
            let company = companies
                .find_by_id(&id)?
                .ok_or_else(|| anyhow::anyhow!("Company not found: {}", id))?;
            emit_json(&RankedCompany::from(company), None)
        }
    }
}
