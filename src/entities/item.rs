//! Item entity - A consumable tracked by the journal.
//!
//! Each item owns an inventory ledger (its transactions), optional snapshots and sessions.
//! The inventory unit is resolved once, when the item is created, and every ledger write is
//! validated against it.

use crate::core::amount::Unit;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of consumable, used to pick a default inventory unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Dried flower
    #[sea_orm(string_value = "flower")]
    Flower,
    /// Edibles (gummies, chocolates, drinks)
    #[sea_orm(string_value = "edible")]
    Edible,
    /// Concentrates (wax, shatter, rosin)
    #[sea_orm(string_value = "concentrate")]
    Concentrate,
    /// Vape cartridges
    #[sea_orm(string_value = "vape")]
    Vape,
    /// Tinctures and oils
    #[sea_orm(string_value = "tincture")]
    Tincture,
    /// Anything else
    #[sea_orm(string_value = "other")]
    Other,
}

impl ItemType {
    /// Stored name, also used as the preference key suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flower => "flower",
            Self::Edible => "edible",
            Self::Concentrate => "concentrate",
            Self::Vape => "vape",
            Self::Tincture => "tincture",
            Self::Other => "other",
        }
    }
}

/// Item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Blue Dream", "Mango Gummies")
    pub name: String,
    /// Kind of consumable
    pub item_type: ItemType,
    /// Unit every ledger amount for this item must use
    pub inventory_unit: Unit,
    /// When the item was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One item has many ledger transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    /// One item has many snapshots
    #[sea_orm(has_many = "super::snapshot::Entity")]
    Snapshots,
    /// One item has many sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::snapshot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Snapshots.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
