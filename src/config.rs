//! Configuration handling for the task analyzer
//!
//! Configuration is read from, in order of precedence:
//! 1. an explicit path (`--config` / `TASK_ANALYZER_CONFIG`)
//! 2. `task-analyzer.toml` in the current directory
//! 3. `config.toml` in the user config directory
//!
//! Every field has a default, so an empty file (or no file at all) is valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::Strategy;

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = "task-analyzer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Tunable weights for the weight-driven strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Points per importance level (urgency, importance-weighted)
    pub importance: f64,

    /// Multiplier on due-date pressure (urgency)
    pub urgency: f64,

    /// Discount for a zero-hour task; shrinks as `1 / (1 + hours)` (urgency)
    pub effort_discount: f64,

    /// Bonus for the first task in dependency order when it has no deadline (urgency)
    pub position: f64,

    /// Points per transitive dependent (importance-weighted)
    pub unblock: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            importance: 2.0,
            urgency: 1.0,
            effort_discount: 3.0,
            position: 2.0,
            unblock: 1.5,
        }
    }
}

/// Largest accepted scoring weight
pub const MAX_WEIGHT: f64 = 1.0e6;

impl ScoringWeights {
    /// Checks that every weight is within `0..=MAX_WEIGHT`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("importance", self.importance),
            ("urgency", self.urgency),
            ("effort_discount", self.effort_discount),
            ("position", self.position),
            ("unblock", self.unblock),
        ];

        for (name, value) in fields {
            if !(0.0..=MAX_WEIGHT).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "weights.{} must be between 0 and {}, got {}",
                    name, MAX_WEIGHT, value
                )));
            }
        }
        Ok(())
    }
}

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Strategy used when a request does not name one
    pub default_strategy: Strategy,

    /// Number of tasks returned by `suggest` when no limit is given
    pub suggest_limit: usize,

    /// Scoring weights
    pub weights: ScoringWeights,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::SmartBalance,
            suggest_limit: 3,
            weights: ScoringWeights::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Loads configuration, using `explicit` if given, else the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load_file(&local);
        }

        if let Some(dir) = Self::global_config_dir() {
            let global = dir.join("config.toml");
            if global.is_file() {
                return Self::load_file(&global);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Returns the user config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "task-analyzer", "task-analyzer")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads and validates a specific config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parses and validates config from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suggest_limit == 0 {
            return Err(ConfigError::Invalid("suggest_limit must be at least 1".to_string()));
        }
        self.weights.validate()
    }
}
