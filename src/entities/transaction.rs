//! Transaction entity - One inventory-affecting event in an item's ledger.
//!
//! Every row stores a signed delta (`amount_value`, `amount_unit`) so the balance is a plain
//! sum regardless of `transaction_type`. Set-type rows additionally record the absolute
//! target in `set_amount_value`/`set_amount_unit`. Rows are never updated after insert.
use crate::core::amount::{Amount, Unit};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of ledger event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Stock bought; positive delta
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Stock used during a session; negative delta
    #[sea_orm(string_value = "consumption")]
    Consumption,
    /// Manual signed correction
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
    /// Balance set to an absolute value; delta computed at write time
    #[sea_orm(string_value = "set")]
    Set,
}

impl TransactionType {
    /// Stored name of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Consumption => "consumption",
            Self::Adjustment => "adjustment",
            Self::Set => "set",
        }
    }
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_transactions")]
pub struct Model {
    /// Unique identifier; increases with insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the item whose ledger this row belongs to
    pub item_id: i64,
    /// Session that consumed the stock, if any
    pub session_id: Option<i64>,
    /// Kind of event
    pub transaction_type: TransactionType,
    /// Signed delta applied to the running balance
    pub amount_value: f64,
    /// Unit of the delta; equals the item's inventory unit at creation
    pub amount_unit: Unit,
    /// Absolute target value, only for `set` rows
    pub set_amount_value: Option<f64>,
    /// Unit of the absolute target, only for `set` rows
    pub set_amount_unit: Option<Unit>,
    /// When the event happened
    pub date: DateTimeUtc,
    /// Free-form note
    pub note: Option<String>,
    /// Historical rows (false) are excluded from the balance
    pub update_inventory: bool,
}

impl Model {
    /// Signed delta carried by this row.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        Amount::new(self.amount_value, self.amount_unit)
    }

    /// Absolute target recorded by a `set` row.
    #[must_use]
    pub fn set_amount(&self) -> Option<Amount> {
        match (self.set_amount_value, self.set_amount_unit) {
            (Some(value), Some(unit)) => Some(Amount::new(value, unit)),
            _ => None,
        }
    }
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
    /// A consumption may reference the session it happened in
    #[sea_orm(
        belongs_to = "super::session::Entity",
        from = "Column::SessionId",
        to = "super::session::Column::Id",
        on_delete = "SetNull"
    )]
    Session,
    /// A purchase transaction has at most one purchase record
    #[sea_orm(has_one = "super::purchase::Entity")]
    Purchase,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
