//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::UnitPreferences,
    core::{amount::Unit, item, session},
    entities::{self, ItemType},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test item with sensible defaults.
///
/// # Defaults
/// * `item_type`: flower
/// * `inventory_unit`: grams
pub async fn create_test_item(db: &DatabaseConnection, name: &str) -> Result<entities::item::Model> {
    create_custom_item(db, name, ItemType::Flower, Some(Unit::Grams)).await
}

/// Creates a test item with a custom type and unit.
/// Passing `None` for the unit resolves it from the built-in preferences.
pub async fn create_custom_item(
    db: &DatabaseConnection,
    name: &str,
    item_type: ItemType,
    unit: Option<Unit>,
) -> Result<entities::item::Model> {
    item::create_item(
        db,
        &UnitPreferences::default(),
        name.to_string(),
        item_type,
        unit,
    )
    .await
}

/// Creates a test session for `item_id` titled "Test session".
pub async fn create_test_session(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<entities::session::Model> {
    session::create_session(db, item_id, "Test session".to_string(), None).await
}

/// Sets up a complete test environment with an item tracked in grams.
/// Returns (db, item) for common test scenarios.
pub async fn setup_with_item() -> Result<(DatabaseConnection, entities::item::Model)> {
    let db = setup_test_db().await?;
    let item = create_test_item(&db, "Test Item").await?;
    Ok((db, item))
}
