//! Configuration structures for the quote pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Main configuration for quotepilot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotePilotConfig {
    /// Completion service configuration.
    pub ai: AiConfig,

    /// Upload guard configuration.
    pub upload: UploadConfig,

    /// Persistence configuration.
    pub store: StoreConfig,
}

/// Reasoning-model completion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Use the completion service at all.
    pub enabled: bool,

    /// Chat completions endpoint URL.
    pub endpoint: String,

    /// Model identifier.
    pub model: String,

    /// Token ceiling for each answer.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Bearer credential. Usually supplied through the environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "o4-mini".to_string(),
            max_tokens: 1200,
            temperature: 0.1,
            timeout_secs: 60,
            api_key: None,
        }
    }
}

impl AiConfig {
    /// Whether a usable credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Upload validation limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum file size in bytes.
    pub max_file_size: u64,

    /// Accepted content types.
    pub allowed_content_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            allowed_content_types: vec![crate::pdf::PDF_CONTENT_TYPE.to_string()],
        }
    }
}

/// Key/value store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file backing the store.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("quotepilot-store.json"),
        }
    }
}

impl QuotePilotConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Overlay settings from process environment variables.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay settings from an arbitrary variable lookup.
    ///
    /// Recognised: `API_KEY`/`OPENAI_API_KEY`, `MODEL_NAME`/`AI_MODEL`,
    /// `MAX_TOKENS`/`AI_MAX_TOKENS`. The first name of each pair wins.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        if let Some(key) = first(&["API_KEY", "OPENAI_API_KEY"]) {
            self.ai.api_key = Some(key);
        }
        if let Some(model) = first(&["MODEL_NAME", "AI_MODEL"]) {
            self.ai.model = model;
        }
        if let Some(raw) = first(&["MAX_TOKENS", "AI_MAX_TOKENS"]) {
            match raw.parse() {
                Ok(tokens) => self.ai.max_tokens = tokens,
                Err(_) => warn!("Ignoring unparseable MAX_TOKENS value '{}'", raw),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = QuotePilotConfig::default();
        assert_eq!(config.ai.model, "o4-mini");
        assert_eq!(config.ai.max_tokens, 1200);
        assert_eq!(config.upload.max_file_size, 10_485_760);
        assert_eq!(config.upload.allowed_content_types, vec!["application/pdf".to_string()]);
        assert!(!config.ai.has_api_key());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: QuotePilotConfig = serde_json::from_str(r#"{"ai": {"model": "gpt-4.1-mini"}}"#).unwrap();
        assert_eq!(config.ai.model, "gpt-4.1-mini");
        assert_eq!(config.ai.timeout_secs, 60);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = QuotePilotConfig::default();
        config.upload.max_file_size = 1024;
        config.save(&path).unwrap();

        assert_eq!(QuotePilotConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_apply_env() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("OPENAI_API_KEY", "sk-test"), ("AI_MODEL", "o3"), ("MAX_TOKENS", "not-a-number")]);

        let mut config = QuotePilotConfig::default();
        config.apply_env_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.ai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.ai.model, "o3");
        assert_eq!(config.ai.max_tokens, 1200);
        assert!(config.ai.has_api_key());
    }

    #[test]
    fn test_unparseable_max_tokens_keeps_current_value() {
        let vars = HashMap::from([("MAX_TOKENS", "abc")]);

        let mut config = QuotePilotConfig::default();
        config.ai.max_tokens = 800;
        config.apply_env_from(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.ai.max_tokens, 800);

        let vars = HashMap::from([("AI_MAX_TOKENS", "-5")]);
        let mut config = QuotePilotConfig::default();
        config.apply_env_from(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.ai.max_tokens, 1200);
    }

    #[test]
    fn test_primary_env_name_wins() {
        let vars = HashMap::from([("MODEL_NAME", "primary"), ("AI_MODEL", "secondary"), ("AI_MAX_TOKENS", "900")]);

        let mut config = QuotePilotConfig::default();
        config.apply_env_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.ai.model, "primary");
        assert_eq!(config.ai.max_tokens, 900);
    }
}
