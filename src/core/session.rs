//! Session business logic - Usage sessions and their link to the ledger.
//!
//! A session belongs to one item. Consumption logged during a session references it;
//! deleting the session clears that reference and keeps the ledger rows.

use crate::{
    entities::{Item, Session, Transaction, session, transaction},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Creates a session for an existing item.
pub async fn create_session(
    db: &DatabaseConnection,
    item_id: i64,
    title: String,
    notes: Option<String>,
) -> Result<session::Model> {
    if title.trim().is_empty() {
        return Err(Error::Config {
            message: "Session title cannot be empty".to_string(),
        });
    }

    Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })?;

    let session = session::ActiveModel {
        item_id: Set(item_id),
        date: Set(chrono::Utc::now()),
        title: Set(title.trim().to_string()),
        notes: Set(notes),
        ..Default::default()
    };
    session.insert(db).await.map_err(Into::into)
}

/// Finds a session by its unique ID.
pub async fn get_session_by_id(
    db: &DatabaseConnection,
    session_id: i64,
) -> Result<Option<session::Model>> {
    Session::find_by_id(session_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an item's sessions, newest first.
pub async fn get_sessions_for_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Vec<session::Model>> {
    Session::find()
        .filter(session::Column::ItemId.eq(item_id))
        .order_by_desc(session::Column::Date)
        .order_by_desc(session::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a session. Transactions that referenced it stay in the ledger with no session.
#[instrument(skip(db))]
pub async fn delete_session(db: &DatabaseConnection, session_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let session = Session::find_by_id(session_id)
        .one(&txn)
        .await?
        .ok_or(Error::SessionNotFound { id: session_id })?;

    let detached = Transaction::update_many()
        .col_expr(
            transaction::Column::SessionId,
            Expr::value(Option::<i64>::None),
        )
        .filter(transaction::Column::SessionId.eq(session_id))
        .exec(&txn)
        .await?;

    session.delete(&txn).await?;
    txn.commit().await?;

    info!(
        "Deleted session {session_id}, detached {} transactions",
        detached.rows_affected
    );
    Ok(())
}
