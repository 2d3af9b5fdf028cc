//! Unified error type for the inventory ledger.
//!
//! Validation failures (`UnitMismatch`, `InvalidAmount`) are raised before any row is
//! written. `Database` covers every persistence failure; an open database transaction is
//! rolled back when it is dropped, so a failed append is never visible to readers.

use crate::core::amount::Unit;
use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Underlying persistence failure (connection, query, insert, or commit)
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The amount's unit differs from the item's inventory unit
    #[error("Units don't match: item tracks {}, got {}", expected.as_str(), found.as_str())]
    UnitMismatch {
        /// Inventory unit configured on the item
        expected: Unit,
        /// Unit of the rejected amount
        found: Unit,
    },

    /// The write would drive the balance below zero while negative inventory is disallowed
    #[error("Insufficient inventory: current {current}, required {required}")]
    InsufficientInventory {
        /// Balance before the write
        current: f64,
        /// Amount the write would remove
        required: f64,
    },

    /// The amount is not finite or has the wrong sign for the operation
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// No item with the given id exists
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// Requested item id
        id: i64,
    },

    /// No session with the given id exists, or it belongs to another item
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// Requested session id
        id: i64,
    },

    /// A numeric conversion overflowed
    #[error("Numeric conversion error: {0}")]
    Conversion(#[from] std::num::TryFromIntError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
