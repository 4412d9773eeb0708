//! Subcommand implementations and the helpers they share.

pub mod companies;
pub mod config;
pub mod invoice;
pub mod search;
pub mod upload;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quotepilot_core::{JsonFileStore, QuotePilotConfig};
use tracing::debug;

/// Options accepted by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit config file.
    pub config: Option<PathBuf>,
    /// Explicit store file, overriding the config.
    pub store: Option<PathBuf>,
}

impl GlobalOptions {
    /// Config file in effect: the explicit path, else the per-user default.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Load the configuration, then layer environment overrides on top.
    ///
    /// A missing default config file is not an error; a missing explicit one is.
    pub fn load_config(&self) -> anyhow::Result<QuotePilotConfig> {
        let mut config = match &self.config {
            Some(path) => QuotePilotConfig::from_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    QuotePilotConfig::from_file(&path)?
                } else {
                    QuotePilotConfig::default()
                }
            }
        };

        config.apply_env();
        Ok(config)
    }

    /// Open the JSON store named by `--store` or the config.
    pub fn open_store(&self, config: &QuotePilotConfig) -> anyhow::Result<Arc<JsonFileStore>> {
        let path = self
            .store
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.store.path));
        debug!("Opening store at {}", path.display());

        let store = JsonFileStore::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open store {}: {}", path.display(), e))?;
        Ok(Arc::new(store))
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotepilot")
        .join("config.json")
}

/// Output format shared by the read commands.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

/// Print `value` as pretty JSON, or write it to `output` when given.
pub fn emit_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!(
                "{} Output written to {}",
                console::style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Yen with thousands separators, e.g. `¥1,234,000`.
pub fn format_yen(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("¥{}", out)
}
