//! Inventory report generation.
//!
//! This module summarises an item's ledger into structured data the UI layer can render,
//! plus a plain-text rendering used by the command-line bootstrap.

use crate::{
    core::{
        amount::{Amount, Unit},
        ledger, snapshot,
    },
    entities::{TransactionType, item, transaction},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Summary of one item's inventory.
#[derive(Debug, Clone)]
pub struct InventoryReport {
    /// The item being reported on
    pub item: item::Model,
    /// Derived balance, `None` for an empty ledger
    pub current_inventory: Option<Amount>,
    /// Target of the most recent `set` transaction
    pub last_set_amount: Option<Amount>,
    /// Sum of purchases that updated inventory
    pub total_purchased: Amount,
    /// Sum of consumption, as a positive quantity
    pub total_consumed: Amount,
    /// Number of recorded snapshots
    pub snapshot_count: usize,
    /// Most recent transactions, newest first
    pub recent_transactions: Vec<transaction::Model>,
}

/// Generates an inventory report for an item.
///
/// # Arguments
/// * `db` - Database connection
/// * `item_id` - ID of the item to report on
/// * `transaction_limit` - Maximum number of recent transactions to include (default 10)
pub async fn generate_inventory_report(
    db: &DatabaseConnection,
    item_id: i64,
    transaction_limit: Option<u64>,
) -> Result<InventoryReport> {
    let item = crate::core::item::get_item_by_id(db, item_id)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;

    let transactions = ledger::get_transactions_for_item(db, item_id).await?;
    let unit = item.inventory_unit;

    let current_inventory = ledger::fold_balance(&transactions, unit);
    let total_purchased = total_of_type(&transactions, TransactionType::Purchase, unit);
    let consumed = total_of_type(&transactions, TransactionType::Consumption, unit);
    let total_consumed = Amount::new(0.0 - consumed.value, unit);

    let last_set_amount = ledger::last_set_amount(db, item_id).await?;
    let snapshot_count = snapshot::get_snapshots_for_item(db, item_id).await?.len();

    let limit = transaction_limit.unwrap_or(10);
    let recent_transactions: Vec<transaction::Model> = transactions
        .into_iter()
        .rev()
        .take(limit.try_into()?)
        .collect();

    Ok(InventoryReport {
        item,
        current_inventory,
        last_set_amount,
        total_purchased,
        total_consumed,
        snapshot_count,
        recent_transactions,
    })
}

fn total_of_type(
    transactions: &[transaction::Model],
    transaction_type: TransactionType,
    unit: Unit,
) -> Amount {
    let value = transactions
        .iter()
        .filter(|t| t.update_inventory && t.transaction_type == transaction_type)
        .fold(0.0, |total, t| total + t.amount_value);
    Amount::new(value, unit)
}

/// Formats a ledger delta with an explicit sign, like "+3.5 g" or "-0.5 g".
#[must_use]
pub fn format_signed_amount(amount: Amount) -> String {
    if amount.value >= 0.0 {
        format!("+{amount}")
    } else {
        amount.to_string()
    }
}

/// Generates a summary line for a transaction.
#[must_use]
pub fn format_transaction_summary(transaction: &transaction::Model) -> String {
    let amount_str = format_signed_amount(transaction.amount());
    let tx_type = match transaction.set_amount() {
        Some(target) => format!("set to {target}"),
        None => transaction.transaction_type.as_str().to_string(),
    };
    let history = if transaction.update_inventory {
        ""
    } else {
        " (history only)"
    };

    match &transaction.note {
        Some(note) => format!("{amount_str} | {tx_type}{history} | {note}"),
        None => format!("{amount_str} | {tx_type}{history}"),
    }
}

/// Renders a report as indented plain text.
#[must_use]
pub fn format_inventory_report(report: &InventoryReport) -> String {
    let current = report
        .current_inventory
        .map_or_else(|| "no inventory recorded".to_string(), |a| a.to_string());

    let mut lines = vec![
        format!("{} ({})", report.item.name, report.item.item_type.as_str()),
        format!("  current: {current}"),
    ];
    if let Some(target) = report.last_set_amount {
        lines.push(format!("  last set to: {target}"));
    }
    lines.push(format!("  purchased: {}", report.total_purchased));
    lines.push(format!("  consumed: {}", report.total_consumed));
    lines.push(format!("  snapshots: {}", report.snapshot_count));

    lines.extend(report.recent_transactions.iter().map(|transaction| {
        format!(
            "    {} {}",
            transaction.date.format("%Y-%m-%d"),
            format_transaction_summary(transaction)
        )
    }));
    lines.join("\n")
}
