//! Item business logic - Creating, finding, renaming and deleting items.
//!
//! Deleting an item removes its whole ledger. The cascade is performed here, child tables
//! first, inside one database transaction, so it does not depend on the database enforcing
//! foreign keys.

use crate::{
    config::UnitPreferences,
    core::amount::Unit,
    entities::{
        Item, ItemType, Purchase, Session, Snapshot, Transaction, item, purchase, session,
        snapshot, transaction,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Retrieves all items, ordered alphabetically by name.
pub async fn get_all_items(db: &DatabaseConnection) -> Result<Vec<item::Model>> {
    Item::find()
        .order_by_asc(item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an item by its unique ID.
pub async fn get_item_by_id(db: &DatabaseConnection, item_id: i64) -> Result<Option<item::Model>> {
    Item::find_by_id(item_id).one(db).await.map_err(Into::into)
}

/// Finds an item by exact name.
pub async fn get_item_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<item::Model>> {
    Item::find()
        .filter(item::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new item.
///
/// The inventory unit is resolved once, here: the explicit `unit` if given, otherwise the
/// preference for `item_type`. It is stored on the item and never re-derived.
///
/// # Errors
/// Returns `Error::Config` for an empty name, or a database error if the insert fails.
pub async fn create_item(
    db: &DatabaseConnection,
    prefs: &UnitPreferences,
    name: String,
    item_type: ItemType,
    unit: Option<Unit>,
) -> Result<item::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Item name cannot be empty".to_string(),
        });
    }

    let inventory_unit = unit.unwrap_or_else(|| prefs.default_for(item_type));

    let item = item::ActiveModel {
        name: Set(name.trim().to_string()),
        item_type: Set(item_type),
        inventory_unit: Set(inventory_unit),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = item.insert(db).await?;
    info!(
        "Created item '{}' ({}) tracked in {}",
        result.name,
        result.item_type.as_str(),
        result.inventory_unit.as_str()
    );
    Ok(result)
}

/// Renames an item. The ledger is untouched.
pub async fn rename_item(
    db: &DatabaseConnection,
    item_id: i64,
    new_name: String,
) -> Result<item::Model> {
    if new_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Item name cannot be empty".to_string(),
        });
    }

    let item = Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;

    let mut active_model: item::ActiveModel = item.into();
    active_model.name = Set(new_name.trim().to_string());
    active_model.update(db).await.map_err(Into::into)
}

/// Deletes an item together with its purchases, transactions, snapshots and sessions.
///
/// Either everything is removed or, on any failure, nothing is.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Item::find_by_id(item_id)
        .one(&txn)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;

    let transaction_ids: Vec<i64> = Transaction::find()
        .select_only()
        .column(transaction::Column::Id)
        .filter(transaction::Column::ItemId.eq(item_id))
        .into_tuple()
        .all(&txn)
        .await?;

    let purchases = Purchase::delete_many()
        .filter(purchase::Column::TransactionId.is_in(transaction_ids))
        .exec(&txn)
        .await?;
    let transactions = Transaction::delete_many()
        .filter(transaction::Column::ItemId.eq(item_id))
        .exec(&txn)
        .await?;
    let snapshots = Snapshot::delete_many()
        .filter(snapshot::Column::ItemId.eq(item_id))
        .exec(&txn)
        .await?;
    let sessions = Session::delete_many()
        .filter(session::Column::ItemId.eq(item_id))
        .exec(&txn)
        .await?;
    Item::delete_by_id(item_id).exec(&txn).await?;

    txn.commit().await?;
    info!(
        "Deleted item {item_id} with {} transactions, {} purchases, {} snapshots, {} sessions",
        transactions.rows_affected,
        purchases.rows_affected,
        snapshots.rows_affected,
        sessions.rows_affected
    );
    Ok(())
}
