//! Purchase entity - Price and place metadata for a purchase-type transaction.
//!
//! Purchase rows are created in the same database transaction as their ledger row and are
//! removed with it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    /// Unique identifier for the purchase record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Ledger row this record describes (1:1)
    #[sea_orm(unique)]
    pub transaction_id: i64,
    /// When the purchase was made
    pub date: DateTimeUtc,
    /// Price paid, if recorded
    pub price: Option<f64>,
    /// Where it was bought, if recorded
    pub location: Option<String>,
    /// Whether this record corrects stock rather than describing a real purchase
    pub is_adjustment: bool,
}

/// Defines relationships between Purchase and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each purchase record belongs to one transaction
    #[sea_orm(
        belongs_to = "super::transaction::Entity",
        from = "Column::TransactionId",
        to = "super::transaction::Column::Id",
        on_delete = "Cascade"
    )]
    Transaction,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
