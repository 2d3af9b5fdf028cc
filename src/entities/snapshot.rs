//! Snapshot entity - A write-once recorded balance for history display.
//!
//! Snapshots are never read by the balance computation.

use crate::core::amount::{Amount, Unit};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "snapshots")]
pub struct Model {
    /// Unique identifier for the snapshot
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Item the balance was recorded for
    pub item_id: i64,
    /// Point in time the balance refers to
    pub date: DateTimeUtc,
    /// Recorded value
    pub amount_value: f64,
    /// Unit of the recorded value
    pub amount_unit: Unit,
}

impl Model {
    /// Recorded balance.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        Amount::new(self.amount_value, self.amount_unit)
    }
}

/// Defines relationships between Snapshot and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each snapshot belongs to one item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
