//! Default inventory units per item type.
//!
//! `UnitPreferences` is a plain value: it is loaded from the `system_state` table, handed to
//! the code that creates items, and written back explicitly with [`UnitPreferences::save`].
//! Each item type is stored under its own `default_unit.<type>` key.

use crate::{
    core::amount::Unit,
    entities::{ItemType, SystemState, system_state},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const KEY_PREFIX: &str = "default_unit.";

/// Unit a newly created item of each type is tracked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitPreferences {
    /// Default for flower
    pub flower: Unit,
    /// Default for edibles
    pub edible: Unit,
    /// Default for concentrates
    pub concentrate: Unit,
    /// Default for vape cartridges
    pub vape: Unit,
    /// Default for tinctures
    pub tincture: Unit,
    /// Default for everything else
    pub other: Unit,
}

impl Default for UnitPreferences {
    fn default() -> Self {
        Self {
            flower: Unit::Grams,
            edible: Unit::Milligrams,
            concentrate: Unit::Grams,
            vape: Unit::Milliliters,
            tincture: Unit::Milliliters,
            other: Unit::Count,
        }
    }
}

impl UnitPreferences {
    /// Default unit for `item_type`.
    #[must_use]
    pub const fn default_for(&self, item_type: ItemType) -> Unit {
        match item_type {
            ItemType::Flower => self.flower,
            ItemType::Edible => self.edible,
            ItemType::Concentrate => self.concentrate,
            ItemType::Vape => self.vape,
            ItemType::Tincture => self.tincture,
            ItemType::Other => self.other,
        }
    }

    /// Changes the default unit for `item_type`. Existing items are unaffected.
    pub fn set_default(&mut self, item_type: ItemType, unit: Unit) {
        match item_type {
            ItemType::Flower => self.flower = unit,
            ItemType::Edible => self.edible = unit,
            ItemType::Concentrate => self.concentrate = unit,
            ItemType::Vape => self.vape = unit,
            ItemType::Tincture => self.tincture = unit,
            ItemType::Other => self.other = unit,
        }
    }

    fn entries(&self) -> [(ItemType, Unit); 6] {
        [
            ItemType::Flower,
            ItemType::Edible,
            ItemType::Concentrate,
            ItemType::Vape,
            ItemType::Tincture,
            ItemType::Other,
        ]
        .map(|item_type| (item_type, self.default_for(item_type)))
    }

    /// Loads stored preferences, using the built-in default for any key not stored yet.
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored value is not a known unit.
    pub async fn load(db: &DatabaseConnection) -> Result<Self> {
        let rows = SystemState::find()
            .filter(system_state::Column::Key.starts_with(KEY_PREFIX))
            .all(db)
            .await?;

        let mut prefs = Self::default();
        for (item_type, _) in prefs.entries() {
            let key = preference_key(item_type);
            if let Some(row) = rows.iter().find(|row| row.key == key) {
                let unit = row.value.parse::<Unit>().map_err(|e| Error::Config {
                    message: format!("Invalid stored unit for {key}: {e}"),
                })?;
                prefs.set_default(item_type, unit);
            }
        }

        debug!("Loaded unit preferences: {prefs:?}");
        Ok(prefs)
    }

    /// Writes every preference to `system_state` in one database transaction.
    ///
    /// # Errors
    /// Returns an error if any read, write or the commit fails; nothing is stored then.
    pub async fn save(&self, db: &DatabaseConnection) -> Result<()> {
        let txn = db.begin().await?;
        let now = Utc::now().naive_utc();

        for (item_type, unit) in self.entries() {
            let key = preference_key(item_type);
            let existing = SystemState::find()
                .filter(system_state::Column::Key.eq(key.as_str()))
                .one(&txn)
                .await?;

            if let Some(state) = existing {
                let mut active_model: system_state::ActiveModel = state.into();
                active_model.value = Set(unit.as_str().to_string());
                active_model.updated_at = Set(now);
                active_model.update(&txn).await?;
            } else {
                let new_state = system_state::ActiveModel {
                    key: Set(key),
                    value: Set(unit.as_str().to_string()),
                    updated_at: Set(now),
                    ..Default::default()
                };
                new_state.insert(&txn).await?;
            }
        }

        txn.commit().await?;
        info!("Saved unit preferences");
        Ok(())
    }
}

fn preference_key(item_type: ItemType) -> String {
    format!("{KEY_PREFIX}{}", item_type.as_str())
}

/// Stores `configured` if no preferences have been saved yet, then returns the
/// effective preferences.
///
/// Preferences already in the database win over the config file.
pub async fn seed_unit_preferences(
    db: &DatabaseConnection,
    configured: &UnitPreferences,
) -> Result<UnitPreferences> {
    let stored = SystemState::find()
        .filter(system_state::Column::Key.starts_with(KEY_PREFIX))
        .count(db)
        .await?;

    if stored == 0 {
        info!("Seeding unit preferences from configuration");
        configured.save(db).await?;
    }

    UnitPreferences::load(db).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_builtin_defaults() {
        let prefs = UnitPreferences::default();
        assert_eq!(prefs.default_for(ItemType::Flower), Unit::Grams);
        assert_eq!(prefs.default_for(ItemType::Edible), Unit::Milligrams);
        assert_eq!(prefs.default_for(ItemType::Concentrate), Unit::Grams);
        assert_eq!(prefs.default_for(ItemType::Vape), Unit::Milliliters);
        assert_eq!(prefs.default_for(ItemType::Tincture), Unit::Milliliters);
        assert_eq!(prefs.default_for(ItemType::Other), Unit::Count);
    }

    #[tokio::test]
    async fn test_load_without_stored_rows_returns_defaults() -> Result<()> {
        let db = setup_test_db().await?;
        let prefs = UnitPreferences::load(&db).await?;
        assert_eq!(prefs, UnitPreferences::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<()> {
        let db = setup_test_db().await?;

        let mut prefs = UnitPreferences::default();
        prefs.set_default(ItemType::Flower, Unit::Ounces);
        prefs.set_default(ItemType::Edible, Unit::Count);
        prefs.save(&db).await?;

        let loaded = UnitPreferences::load(&db).await?;
        assert_eq!(loaded, prefs);

        // Saving again updates rows in place
        prefs.set_default(ItemType::Flower, Unit::Pounds);
        prefs.save(&db).await?;
        let reloaded = UnitPreferences::load(&db).await?;
        assert_eq!(reloaded.default_for(ItemType::Flower), Unit::Pounds);

        let rows = SystemState::find().count(&db).await?;
        assert_eq!(rows, 6);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_stored_unit() -> Result<()> {
        let db = setup_test_db().await?;
        system_state::ActiveModel {
            key: Set("default_unit.flower".to_string()),
            value: Set("bushels".to_string()),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let result = UnitPreferences::load(&db).await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_only_applies_once() -> Result<()> {
        let db = setup_test_db().await?;

        let mut configured = UnitPreferences::default();
        configured.set_default(ItemType::Flower, Unit::Ounces);
        let seeded = seed_unit_preferences(&db, &configured).await?;
        assert_eq!(seeded.default_for(ItemType::Flower), Unit::Ounces);

        // A later config change does not overwrite stored preferences
        configured.set_default(ItemType::Flower, Unit::Pounds);
        let reseeded = seed_unit_preferences(&db, &configured).await?;
        assert_eq!(reseeded.default_for(ItemType::Flower), Unit::Ounces);

        Ok(())
    }
}
