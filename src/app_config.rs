use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::file_utils::FileManager;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for the export stage
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    // @field: Substitution rule table path, empty disables the pass
    #[serde(default = "String::new")]
    pub rules_file: String,

    // @field: Output format for bilingual .ass input
    #[serde(default)]
    pub bilingual_format: BilingualFormat,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            rules_file: String::new(),
            bilingual_format: BilingualFormat::default(),
        }
    }
}

/// Output format for a bilingual conversion
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BilingualFormat {
    // @format: Tabular spreadsheet
    #[default]
    Xlsx,
    // @format: Flat two-line text
    Txt,
}

impl BilingualFormat {
    // @returns: Output file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Txt => "txt",
        }
    }
}

// Implement Display trait for BilingualFormat
impl std::fmt::Display for BilingualFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

// Implement FromStr trait for BilingualFormat
impl std::str::FromStr for BilingualFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "txt" => Ok(Self::Txt),
            _ => Err(anyhow!("Invalid bilingual format: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // A configured rule table must exist; an empty path disables the pass
        if !self.export.rules_file.is_empty() && !FileManager::file_exists(&self.export.rules_file)
        {
            return Err(anyhow!(
                "Rule table not found: {}",
                self.export.rules_file
            ));
        }

        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| anyhow!("Failed to serialize config: {}", e))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            export: ExportConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
