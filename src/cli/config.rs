//! Configuration management for weeder
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.weeder/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::args::Verbosity;
use crate::dates::{PatternExtractor, DEFAULT_NAME_PATTERN};
use crate::errors::{Result, WeederError};
use crate::policy::{Policy, PolicyTier, DEFAULT_POLICY};

/// Complete configuration for weeder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub policy: PolicyConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Retention tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub tiers: Vec<PolicyTier>,
}

/// How dates are read from file names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub pattern: String,
}

/// What gets printed and how loudly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub mode: OutputMode,
    pub default_verbosity: String,
}

/// Which side of the decision is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Keepers,
    #[default]
    Goners,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_POLICY.to_vec(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_NAME_PATTERN.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Goners,
            default_verbosity: "normal".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WeederError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            WeederError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::default())
    }

    /// ~/.weeder/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".weeder").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.policy()?;
        self.extractor()?;
        self.default_verbosity()?;
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| {
            WeederError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WeederError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents).map_err(|e| {
            WeederError::ConfigError(format!("Failed to write config: {}", e))
        })?;

        Ok(())
    }

    /// Configured retention policy
    pub fn policy(&self) -> Result<Policy> {
        Policy::new(self.policy.tiers.iter().copied())
    }

    /// Configured date extractor
    pub fn extractor(&self) -> Result<PatternExtractor> {
        PatternExtractor::new(&self.extraction.pattern)
    }

    /// Verbosity used when no -q/-v flag is given
    pub fn default_verbosity(&self) -> Result<Verbosity> {
        self.output.default_verbosity.parse()
    }
}
