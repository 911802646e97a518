//! Engine configuration.
//!
//! Lives in `p2phub.toml`. Every section is optional; a missing file gives
//! the defaults.
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [catalog]
//! path = "catalog.toml"
//! missing_goal = "reject"
//!
//! [ticker]
//! interval_secs = 1
//! ```

use crate::catalog::{Catalog, MissingGoalPolicy};
use crate::error::ProgressError;
use crate::ticker::INTERVAL_RANGE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "p2phub.toml";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Catalog source and validation policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file; builtin catalog when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub missing_goal: MissingGoalPolicy,
}

impl CatalogConfig {
    /// Load the configured catalog, or the builtin one
    pub fn load_catalog(&self) -> Result<(Catalog, Vec<ProgressError>), ProgressError> {
        match &self.path {
            Some(path) => Catalog::load(path, self.missing_goal),
            None => Ok((Catalog::builtin(), Vec::new())),
        }
    }
}

/// Verification countdown settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Seconds between ticks (valid: 1-60)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u32,
}

fn default_interval_secs() -> u32 {
    1
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl TickerConfig {
    pub fn effective_interval_secs(&self) -> u32 {
        self.interval_secs.clamp(*INTERVAL_RANGE.start(), *INTERVAL_RANGE.end())
    }

    pub fn interval_was_clamped(&self) -> bool {
        self.interval_secs != self.effective_interval_secs()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub ticker: TickerConfig,
}

impl EngineConfig {
    /// Load from `path`. Missing file gives defaults; a broken file is an error.
    pub fn load(path: &Path) -> Result<Self, ProgressError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ProgressError> {
        Ok(toml::from_str(content)?)
    }
}

/// Config path in the working directory
pub fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.log.level, "info");
        assert!(config.catalog.path.is_none());
        assert_eq!(config.catalog.missing_goal, MissingGoalPolicy::Reject);
        assert_eq!(config.ticker.interval_secs, 1);
    }

    #[test]
    fn test_partial_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [catalog]
            missing_goal = "default_one"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.missing_goal, MissingGoalPolicy::DefaultOne);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_interval_clamping() {
        let mut ticker = TickerConfig { interval_secs: 0 };
        assert_eq!(ticker.effective_interval_secs(), 1);
        assert!(ticker.interval_was_clamped());

        ticker.interval_secs = 600;
        assert_eq!(ticker.effective_interval_secs(), 60);

        ticker.interval_secs = 5;
        assert!(!ticker.interval_was_clamped());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = EngineConfig::load(Path::new("/nonexistent/p2phub.toml")).unwrap();
        assert_eq!(config.ticker.interval_secs, 1);
    }

    #[test]
    fn test_builtin_catalog_when_no_path() {
        let (catalog, rejected) = CatalogConfig::default().load_catalog().unwrap();
        assert!(rejected.is_empty());
        assert!(catalog.get("invite_3").is_some());
    }
}
