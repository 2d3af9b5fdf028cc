//! Snapshot business logic - Point-in-time balances kept for history.
//!
//! Snapshots are informational. They are never edited and never feed the derived balance.

use crate::{
    core::{amount::Amount, ledger},
    entities::{Item, Snapshot, snapshot},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Records `amount` as the item's balance at `date`.
pub async fn record_snapshot(
    db: &DatabaseConnection,
    item_id: i64,
    amount: Amount,
    date: DateTimeUtc,
) -> Result<snapshot::Model> {
    if !amount.is_finite() {
        return Err(Error::InvalidAmount {
            amount: amount.value,
        });
    }

    Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;

    let snapshot = snapshot::ActiveModel {
        item_id: Set(item_id),
        date: Set(date),
        amount_value: Set(amount.value),
        amount_unit: Set(amount.unit),
        ..Default::default()
    };
    let result = snapshot.insert(db).await?;
    debug!("Recorded snapshot {} of {amount} for item {item_id}", result.id);
    Ok(result)
}

/// Records the item's current derived balance as a snapshot dated now.
///
/// Returns `None` without writing anything when the ledger has no balance yet.
pub async fn snapshot_current_inventory(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<snapshot::Model>> {
    match ledger::current_inventory(db, item_id).await? {
        Some(balance) => record_snapshot(db, item_id, balance, Utc::now())
            .await
            .map(Some),
        None => Ok(None),
    }
}

/// Retrieves an item's snapshots in date order (oldest first).
pub async fn get_snapshots_for_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Vec<snapshot::Model>> {
    Snapshot::find()
        .filter(snapshot::Column::ItemId.eq(item_id))
        .order_by_asc(snapshot::Column::Date)
        .order_by_asc(snapshot::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
