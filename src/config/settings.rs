//! Application settings loading from config.toml
//!
//! The config file seeds the default inventory units (stored afterwards in `system_state`),
//! tunes ledger behavior, and may name the database. Every section is optional.

use crate::config::units::UnitPreferences;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Database URL; `DATABASE_URL` from the environment takes precedence
    #[serde(default)]
    pub database_url: Option<String>,
    /// Default inventory unit per item type, used on first start-up
    #[serde(default)]
    pub units: UnitPreferences,
    /// Ledger behavior switches
    #[serde(default)]
    pub ledger: LedgerSettings,
}

/// Behavior switches for ledger writes.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LedgerSettings {
    /// Whether consumption may drive the balance below zero
    #[serde(default = "default_allow_negative")]
    pub allow_negative_inventory: bool,
}

const fn default_allow_negative() -> bool {
    true
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            allow_negative_inventory: default_allow_negative(),
        }
    }
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A unit name is not recognised
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads configuration from `STASH_CONFIG`, or `./config.toml` when unset.
///
/// A missing file is not an error: built-in defaults are used instead.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var("STASH_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        tracing::warn!("No config file at {path}, using defaults");
        Ok(AppConfig::default())
    }
}
