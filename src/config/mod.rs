/// Database connection and schema creation
pub mod database;

/// Application settings loaded from config.toml
pub mod settings;

/// Default inventory units per item type, persisted in `system_state`
pub mod units;

pub use settings::{AppConfig, LedgerSettings, load_config, load_default_config};
pub use units::UnitPreferences;
