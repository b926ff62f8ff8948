//! Configuration system for OTForge.
//!
//! Load typology configuration from TOML or YAML to choose the ranking
//! bias, the comparer and the filtering steps without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use otforge_config::{ComparerKind, TypologyConfig};
//! use otforge_core::RankingBiasKind;
//!
//! let config = TypologyConfig::from_toml_str(r#"
//!     ranking_bias = "faith_low"
//!     comparer = "ctie"
//!     label_prefix = "G"
//!     thread_count = { count = 4 }
//! "#).unwrap();
//!
//! assert_eq!(config.ranking_bias, RankingBiasKind::FaithLow);
//! assert_eq!(config.comparer, ComparerKind::Ctie);
//! assert_eq!(config.label(2), "G2");
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use otforge_config::TypologyConfig;
//!
//! let config = TypologyConfig::load("typology.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;

use otforge_core::RankingBiasKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Typology configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct TypologyConfig {
    /// Ranking bias used by RCD when building language hierarchies.
    pub ranking_bias: RankingBiasKind,

    /// Stratum comparer used when evaluating candidates.
    pub comparer: ComparerKind,

    /// Prefix for language labels (`L1`, `L2`, ...).
    pub label_prefix: String,

    /// Whether harmonically bound candidates are removed before enumeration.
    pub filter_harmonically_bound: bool,

    /// Whether contenders with identical violation profiles are merged.
    pub merge_identical_contenders: bool,

    /// Number of threads for contender and language checks.
    pub thread_count: ThreadCount,
}

impl Default for TypologyConfig {
    fn default() -> Self {
        Self {
            ranking_bias: RankingBiasKind::default(),
            comparer: ComparerKind::default(),
            label_prefix: "L".to_string(),
            filter_harmonically_bound: true,
            merge_identical_contenders: true,
            thread_count: ThreadCount::default(),
        }
    }
}

impl TypologyConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.label_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("label_prefix must not be empty".into()));
        }
        if self.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "thread_count must be at least 1; use \"none\" to disable threads".into(),
            ));
        }
        Ok(self)
    }

    /// Sets the ranking bias.
    pub fn with_ranking_bias(mut self, bias: RankingBiasKind) -> Self {
        self.ranking_bias = bias;
        self
    }

    /// Sets the comparer.
    pub fn with_comparer(mut self, comparer: ComparerKind) -> Self {
        self.comparer = comparer;
        self
    }

    /// Sets the language label prefix.
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    /// Enables or disables harmonic-boundedness filtering.
    pub fn with_filter_harmonically_bound(mut self, enabled: bool) -> Self {
        self.filter_harmonically_bound = enabled;
        self
    }

    /// Enables or disables merging of identical contenders.
    pub fn with_merge_identical_contenders(mut self, enabled: bool) -> Self {
        self.merge_identical_contenders = enabled;
        self
    }

    /// Sets the thread count.
    pub fn with_thread_count(mut self, threads: ThreadCount) -> Self {
        self.thread_count = threads;
        self
    }

    /// Returns the label of the `n`th language, counting from 1.
    pub fn label(&self, n: usize) -> String {
        format!("{}{}", self.label_prefix, n)
    }

    /// Returns true if typology checks should run on a thread pool.
    pub fn is_parallel(&self) -> bool {
        !matches!(self.thread_count, ThreadCount::None | ThreadCount::Count(1))
    }
}

/// Stratum comparer selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparerKind {
    /// Pooled violations per stratum.
    #[default]
    Pool,

    /// Conflicts tie per stratum.
    Ctie,
}

impl fmt::Display for ComparerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparerKind::Pool => write!(f, "pool"),
            ComparerKind::Ctie => write!(f, "ctie"),
        }
    }
}

/// Thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the global thread pool.
    #[default]
    Auto,

    /// Run on the calling thread.
    None,

    /// Specific number of threads.
    Count(usize),
}
