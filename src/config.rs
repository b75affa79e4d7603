//! Configuration management for the torinos command-line driver

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::analyzer::AnalysisMode;

/// Default tracing filter when neither `RUST_LOG` nor the config sets one
const DEFAULT_LOG_LEVEL: &str = "info";

/// Driver configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Batch analysis configuration
    pub analysis: AnalysisConfig,
    /// Report output configuration
    pub output: OutputConfig,
    /// Tracing filter directive (e.g. "debug", "torinos=trace")
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Batch analysis configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Strict aborts on the first bad manifest; lenient reports each one
    pub mode: AnalysisMode,
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Summary,
    Markdown,
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: OutputFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

impl Config {
    /// Parse configuration from a JSON value, falling back to defaults when
    /// the value is absent or does not match the expected shape.
    pub fn from_value(value: Option<serde_json::Value>) -> Self {
        match value {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid configuration: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load configuration from a JSON file.
    ///
    /// Unlike [`Config::from_value`], a missing or unreadable file is an error:
    /// the path was given explicitly.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Self::from_value(Some(value)))
    }
}
