//! Environment-driven application configuration.

use core::str::FromStr;
use std::path::PathBuf;

use thiserror::Error;

pub const CATALOG_ENV: &str = "TOYSTORE_CATALOG";
pub const SAVE_POLICY_ENV: &str = "TOYSTORE_SAVE_POLICY";
pub const DEFAULT_CATALOG_PATH: &str = "res/toys.txt";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var} value {value:?}: expected one of {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// When the catalog is written back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SavePolicy {
    /// After every successful add or remove, and on exit.
    #[default]
    AfterChange,
    /// Only on exit.
    OnExit,
}

impl FromStr for SavePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "after-change" => Ok(SavePolicy::AfterChange),
            "on-exit" => Ok(SavePolicy::OnExit),
            _ => Err(ConfigError::Invalid {
                var: SAVE_POLICY_ENV,
                value: s.to_string(),
                expected: "after-change, on-exit",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub save_policy: SavePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            save_policy: SavePolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset or blank variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let set = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let mut config = Self::default();
        if let Some(path) = set(CATALOG_ENV) {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(policy) = set(SAVE_POLICY_ENV) {
            config.save_policy = policy.parse()?;
        }
        Ok(config)
    }
}
