use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Used by `triplets` when no flag is given.
    pub max_knowledge_triplets: u64,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_knowledge_triplets: 10,
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl RenderConfig {
    /// Load from a JSON file; fields left out keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// `-v` raises the configured level one step per occurrence.
    pub fn effective_level(&self, verbosity: u8) -> tracing::Level {
        let base: u8 = match self.log_level.to_ascii_lowercase().as_str() {
            "error" => 0,
            "warn" => 1,
            "info" => 2,
            "debug" => 3,
            "trace" => 4,
            _ => 1,
        };
        match base.saturating_add(verbosity) {
            0 => tracing::Level::ERROR,
            1 => tracing::Level::WARN,
            2 => tracing::Level::INFO,
            3 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.max_knowledge_triplets, 10);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = RenderConfig::from_json(r#"{"max_knowledge_triplets": 25}"#).unwrap();
        assert_eq!(config.max_knowledge_triplets, 25);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_log_format_json() {
        let config = RenderConfig::from_json(r#"{"log_format": "json"}"#).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(RenderConfig::from_json("{not json").is_err());
    }

    #[test]
    fn test_effective_level() {
        let config = RenderConfig::default();
        assert_eq!(config.effective_level(0), tracing::Level::WARN);
        assert_eq!(config.effective_level(2), tracing::Level::DEBUG);
        assert_eq!(config.effective_level(9), tracing::Level::TRACE);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("prompts.json");
        std::fs::write(&path, r#"{"log_level": "debug"}"#).unwrap();

        let config = RenderConfig::from_file(&path).unwrap();
        assert_eq!(config.effective_level(0), tracing::Level::DEBUG);
    }
}
