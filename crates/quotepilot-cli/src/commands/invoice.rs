//! Invoice command - inspect stored invoices.

use clap::{Args, Subcommand};
use console::style;

use quotepilot_core::models::QuoteSummary;
use quotepilot_core::InvoiceRepository;

use super::{emit_json, format_yen, GlobalOptions};

/// Arguments for the invoice command.
#[derive(Args)]
pub struct InvoiceArgs {
    #[command(subcommand)]
    command: InvoiceCommand,
}

#[derive(Subcommand)]
enum InvoiceCommand {
    /// List stored invoices, oldest first
    List,

    /// Show one invoice
    Show {
        /// Invoice id
        id: String,

        /// Show the derived business summary instead of the raw record
        #[arg(long)]
        summary: bool,
    },

    /// Delete an invoice
    Delete {
        /// Invoice id
        id: String,
    },
}

pub async fn run(args: InvoiceArgs, global: &GlobalOptions) -> anyhow::Result<()> {
    let config = global.load_config()?;
    let invoices = InvoiceRepository::new(global.open_store(&config)?);

    match args.command {
        InvoiceCommand::List => {
            let all = invoices.find_all()?;
            if all.is_empty() {
                println!("{} No invoices stored.", style("ℹ").blue());
            }
            for invoice in &all {
                println!(
                    "{}  {}  {}  {}  {}",
                    invoice.id,
                    invoice.uploaded_at.format("%Y-%m-%d %H:%M"),
                    invoice.company_name,
                    invoice
                        .business_category
                        .map(|c| c.label())
                        .unwrap_or("-"),
                    format_yen(invoice.total_amount)
                );
            }
            Ok(())
        }
        InvoiceCommand::Show { id, summary } => {
            let invoice = invoices
                .find_by_id(&id)?
                .ok_or_else(|| anyhow::anyhow!("Invoice not found: {}", id))?;

            if summary {
                let report = serde_json::json!({
                    "businessInfo": invoice.detailed_business_info(),
                    "matchingKeywords": invoice.matching_keywords(),
                    "quoteSummary": QuoteSummary::from_invoice(&invoice),
                });
                emit_json(&report, None)
            } else {
                emit_json(&invoice, None)
            }
        }
        InvoiceCommand::Delete { id } => {
            if invoices.find_by_id(&id)?.is_none() {
                anyhow::bail!("Invoice not found: {}", id);
            }
            invoices.delete(&id)?;
            println!("{} Deleted invoice {}", style("✓").green(), id);
            Ok(())
        }
    }
}
