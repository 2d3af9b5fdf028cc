//! Inventory ledger business logic - The append-only transaction history of an item.
//!
//! Every transaction stores a signed delta in the item's inventory unit, whatever its type.
//! The current balance is therefore a single sum over the rows that update inventory
//! ([`fold_balance`]); a `set` computes its delta at write time.
//!
//! Each mutator runs in one database transaction: the item is loaded, the amount is
//! validated, the balance is read if needed, and the new row(s) are inserted before the
//! commit. A failure at any step drops the transaction, so readers never see a partial
//! append.

use crate::{
    config::LedgerSettings,
    core::amount::{Amount, Unit},
    entities::{
        Item, Purchase, Session, Transaction, TransactionType, item, purchase, transaction,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument};

/// Shortfall below zero that strict consumption still treats as an empty balance.
pub const BALANCE_TOLERANCE: f64 = 1e-9;

/// Optional details recorded with a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseDetails {
    /// When the purchase was made; defaults to now
    pub date: Option<DateTimeUtc>,
    /// Price paid
    pub price: Option<f64>,
    /// Store or place of purchase
    pub location: Option<String>,
    /// Marks the record as a stock correction rather than a real purchase
    pub is_adjustment: bool,
    /// When false the purchase is logged for history only and does not move the balance
    pub update_inventory: bool,
}

impl Default for PurchaseDetails {
    fn default() -> Self {
        Self {
            date: None,
            price: None,
            location: None,
            is_adjustment: false,
            update_inventory: true,
        }
    }
}

/// Folds ledger rows into the derived balance.
///
/// Sums `amount_value` over rows with `update_inventory` set and labels the result with
/// `unit`. Returns `None` when no row qualifies. The sum does not depend on row order.
#[must_use]
pub fn fold_balance<'a, I>(transactions: I, unit: Unit) -> Option<Amount>
where
    I: IntoIterator<Item = &'a transaction::Model>,
{
    transactions
        .into_iter()
        .filter(|t| t.update_inventory)
        .fold(None, |total: Option<f64>, t| {
            Some(total.unwrap_or(0.0) + t.amount_value)
        })
        .map(|value| Amount::new(value, unit))
}

/// Current derived balance of an item, or `None` if its ledger has no qualifying rows.
pub async fn current_inventory(db: &DatabaseConnection, item_id: i64) -> Result<Option<Amount>> {
    let item = load_item(db, item_id).await?;
    ledger_balance(db, &item).await
}

/// Sets the item's balance to `new_amount`.
///
/// Appends a `set` transaction whose delta is `new_amount - current` (current defaults to
/// zero for an empty ledger) and which records `new_amount` as its absolute target.
///
/// # Errors
/// * `Error::InvalidAmount` if the value or the resulting delta is not finite
/// * `Error::ItemNotFound` if the item does not exist
/// * `Error::UnitMismatch` if `new_amount.unit` differs from the item's inventory unit
/// * `Error::Database` if the insert or commit fails; nothing is appended then
#[instrument(skip(db, note))]
pub async fn set_current_amount(
    db: &DatabaseConnection,
    item_id: i64,
    new_amount: Amount,
    note: Option<String>,
) -> Result<transaction::Model> {
    ensure_finite(new_amount)?;

    let txn = db.begin().await?;

    let item = load_item(&txn, item_id).await?;
    ensure_unit(&item, new_amount)?;

    let current = ledger_balance(&txn, &item)
        .await?
        .unwrap_or_else(|| Amount::zero(item.inventory_unit));
    let delta = Amount::new(new_amount.value - current.value, new_amount.unit);
    ensure_finite(delta)?;
    debug!("Setting item {item_id} from {current} to {new_amount} (delta {delta})");

    let row = transaction::ActiveModel {
        item_id: Set(item_id),
        session_id: Set(None),
        transaction_type: Set(TransactionType::Set),
        amount_value: Set(delta.value),
        amount_unit: Set(delta.unit),
        set_amount_value: Set(Some(new_amount.value)),
        set_amount_unit: Set(Some(new_amount.unit)),
        date: Set(Utc::now()),
        note: Set(note),
        update_inventory: Set(true),
        ..Default::default()
    };
    let result = row.insert(&txn).await?;

    txn.commit().await?;
    info!("Item {item_id} inventory set to {new_amount}");
    Ok(result)
}

/// Applies a signed adjustment to the item's balance.
///
/// # Errors
/// * `Error::InvalidAmount` if the value, or the balance it would produce, is not finite
/// * `Error::ItemNotFound` if the item does not exist
/// * `Error::UnitMismatch` if `adjustment.unit` differs from the item's inventory unit
/// * `Error::Database` if the insert or commit fails; nothing is appended then
#[instrument(skip(db, note))]
pub async fn add_inventory_adjustment(
    db: &DatabaseConnection,
    item_id: i64,
    adjustment: Amount,
    note: Option<String>,
) -> Result<transaction::Model> {
    ensure_finite(adjustment)?;

    let txn = db.begin().await?;

    let item = load_item(&txn, item_id).await?;
    ensure_unit(&item, adjustment)?;
    let current = ledger_balance(&txn, &item).await?;
    ensure_balance_finite(current, adjustment)?;

    let row = transaction::ActiveModel {
        item_id: Set(item_id),
        session_id: Set(None),
        transaction_type: Set(TransactionType::Adjustment),
        amount_value: Set(adjustment.value),
        amount_unit: Set(adjustment.unit),
        set_amount_value: Set(None),
        set_amount_unit: Set(None),
        date: Set(Utc::now()),
        note: Set(note),
        update_inventory: Set(true),
        ..Default::default()
    };
    let result = row.insert(&txn).await?;

    txn.commit().await?;
    info!("Item {item_id} inventory adjusted by {adjustment}");
    Ok(result)
}

/// Records a purchase of `amount` and its purchase record, atomically.
///
/// # Errors
/// * `Error::InvalidAmount` if the amount is not positive and finite, the price is
///   negative or not finite, or the resulting balance would overflow
/// * `Error::ItemNotFound` / `Error::UnitMismatch` as for the other mutators
/// * `Error::Database` if either insert or the commit fails; neither row is kept then
#[instrument(skip(db, details, note))]
pub async fn record_purchase(
    db: &DatabaseConnection,
    item_id: i64,
    amount: Amount,
    details: PurchaseDetails,
    note: Option<String>,
) -> Result<(transaction::Model, purchase::Model)> {
    ensure_positive(amount)?;
    if let Some(price) = details.price {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidAmount { amount: price });
        }
    }

    let txn = db.begin().await?;

    let item = load_item(&txn, item_id).await?;
    ensure_unit(&item, amount)?;
    if details.update_inventory {
        let current = ledger_balance(&txn, &item).await?;
        ensure_balance_finite(current, amount)?;
    }

    let date = details.date.unwrap_or_else(Utc::now);
    let row = transaction::ActiveModel {
        item_id: Set(item_id),
        session_id: Set(None),
        transaction_type: Set(TransactionType::Purchase),
        amount_value: Set(amount.value),
        amount_unit: Set(amount.unit),
        set_amount_value: Set(None),
        set_amount_unit: Set(None),
        date: Set(date),
        note: Set(note),
        update_inventory: Set(details.update_inventory),
        ..Default::default()
    };
    let transaction = row.insert(&txn).await?;

    let record = purchase::ActiveModel {
        transaction_id: Set(transaction.id),
        date: Set(date),
        price: Set(details.price),
        location: Set(details.location),
        is_adjustment: Set(details.is_adjustment),
        ..Default::default()
    };
    let purchase = record.insert(&txn).await?;

    txn.commit().await?;
    if details.update_inventory {
        info!("Item {item_id} purchased {amount}");
    } else {
        info!("Item {item_id} historical purchase of {amount} logged");
    }
    Ok((transaction, purchase))
}

/// Records consumption of `consumed` (a positive quantity), optionally tied to a session.
///
/// The stored delta is `-consumed.value`. When `settings.allow_negative_inventory` is
/// false, consumption that would take the balance below zero is rejected. A shortfall
/// within [`BALANCE_TOLERANCE`] counts as zero, so accumulated rounding in the fold does
/// not block consuming the displayed balance.
///
/// # Errors
/// * `Error::InvalidAmount` if the quantity is not positive and finite, or the resulting
///   balance would overflow
/// * `Error::ItemNotFound` / `Error::UnitMismatch` as for the other mutators
/// * `Error::SessionNotFound` if the session does not exist or belongs to another item
/// * `Error::InsufficientInventory` when negative balances are disallowed
/// * `Error::Database` if the insert or commit fails
#[instrument(skip(db, settings, note))]
pub async fn record_consumption(
    db: &DatabaseConnection,
    settings: &LedgerSettings,
    item_id: i64,
    consumed: Amount,
    session_id: Option<i64>,
    note: Option<String>,
) -> Result<transaction::Model> {
    ensure_positive(consumed)?;

    let txn = db.begin().await?;

    let item = load_item(&txn, item_id).await?;
    ensure_unit(&item, consumed)?;

    if let Some(session_id) = session_id {
        let session = Session::find_by_id(session_id).one(&txn).await?;
        if session.is_none_or(|s| s.item_id != item_id) {
            return Err(Error::SessionNotFound { id: session_id });
        }
    }

    let balance = ledger_balance(&txn, &item).await?;
    let delta = Amount::new(-consumed.value, consumed.unit);
    ensure_balance_finite(balance, delta)?;

    if !settings.allow_negative_inventory {
        let current = balance.map_or(0.0, |balance| balance.value);
        if current - consumed.value < -BALANCE_TOLERANCE {
            return Err(Error::InsufficientInventory {
                current,
                required: consumed.value,
            });
        }
    }

    let row = transaction::ActiveModel {
        item_id: Set(item_id),
        session_id: Set(session_id),
        transaction_type: Set(TransactionType::Consumption),
        amount_value: Set(delta.value),
        amount_unit: Set(consumed.unit),
        set_amount_value: Set(None),
        set_amount_unit: Set(None),
        date: Set(Utc::now()),
        note: Set(note),
        update_inventory: Set(true),
        ..Default::default()
    };
    let result = row.insert(&txn).await?;

    txn.commit().await?;
    info!("Item {item_id} consumed {consumed}");
    Ok(result)
}

/// Retrieves an item's ledger in insertion order (oldest first).
pub async fn get_transactions_for_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Vec<transaction::Model>> {
    ledger_rows(db, item_id).await
}

/// Retrieves a specific ledger row by its unique ID.
pub async fn get_transaction_by_id(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<transaction::Model>> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Purchase record attached to a purchase transaction, if any.
pub async fn get_purchase_for_transaction(
    db: &DatabaseConnection,
    transaction_id: i64,
) -> Result<Option<purchase::Model>> {
    Purchase::find()
        .filter(purchase::Column::TransactionId.eq(transaction_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Absolute target of the most recent `set` transaction, for "last set to" displays.
pub async fn last_set_amount(db: &DatabaseConnection, item_id: i64) -> Result<Option<Amount>> {
    let latest = Transaction::find()
        .filter(transaction::Column::ItemId.eq(item_id))
        .filter(transaction::Column::TransactionType.eq(TransactionType::Set))
        .order_by_desc(transaction::Column::Id)
        .one(db)
        .await?;
    Ok(latest.and_then(|t| t.set_amount()))
}

async fn load_item<C>(db: &C, item_id: i64) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })
}

async fn ledger_rows<C>(db: &C, item_id: i64) -> Result<Vec<transaction::Model>>
where
    C: ConnectionTrait,
{
    Transaction::find()
        .filter(transaction::Column::ItemId.eq(item_id))
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn ledger_balance<C>(db: &C, item: &item::Model) -> Result<Option<Amount>>
where
    C: ConnectionTrait,
{
    let rows = ledger_rows(db, item.id).await?;
    Ok(fold_balance(&rows, item.inventory_unit))
}

fn ensure_unit(item: &item::Model, amount: Amount) -> Result<()> {
    if amount.unit != item.inventory_unit {
        return Err(Error::UnitMismatch {
            expected: item.inventory_unit,
            found: amount.unit,
        });
    }
    Ok(())
}

fn ensure_finite(amount: Amount) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::InvalidAmount {
            amount: amount.value,
        });
    }
    Ok(())
}

fn ensure_balance_finite(current: Option<Amount>, delta: Amount) -> Result<()> {
    let resulting = current.map_or(0.0, |balance| balance.value) + delta.value;
    if !resulting.is_finite() {
        return Err(Error::InvalidAmount {
            amount: delta.value,
        });
    }
    Ok(())
}

fn ensure_positive(amount: Amount) -> Result<()> {
    if !amount.is_finite() || amount.value <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: amount.value,
        });
    }
    Ok(())
}
