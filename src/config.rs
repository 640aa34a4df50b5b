//! Configuration file handling.
//!
//! Settings come from an optional TOML file; every section and field has a
//! default, so an empty file (or no file) reproduces the stock behaviour.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::ReportSettings;
use crate::bot::{KeywordLanguage, KeywordRule};
use crate::error::ConfigError;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub bot: BotConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Input dataset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the meteorite landings file.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("meteorite-landings.csv")
}

/// Where result files are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Chat bot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Delay between consecutive reports of `/all_stats`, in milliseconds.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Built-in keyword set for free-text messages.
    #[serde(default)]
    pub language: KeywordLanguage,

    /// Custom keyword rules. When present they replace the built-in set.
    #[serde(default)]
    pub keywords: Vec<KeywordRule>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
            language: KeywordLanguage::default(),
            keywords: Vec::new(),
        }
    }
}

fn default_pacing_ms() -> u64 {
    500
}

/// HTTP webhook listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl AppConfig {
    /// Parse configuration from TOML text and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("report.top_classes", self.report.top_classes),
            ("report.heavy_count", self.report.heavy_count),
            ("report.preview_rows", self.report.preview_rows),
            ("report.decade_rows", self.report.decade_rows),
        ];
        for (name, value) in sizes {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive")));
            }
        }
        for rule in &self.bot.keywords {
            if rule.keywords.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "keyword rule for {} has no keywords",
                    rule.command
                )));
            }
        }
        Ok(())
    }
}
