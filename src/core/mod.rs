//! Core business logic - framework-agnostic item, ledger, session and reporting operations.

/// Quantities and units
pub mod amount;
/// Item creation, lookup and cascading delete
pub mod item;
/// The per-item inventory transaction ledger
pub mod ledger;
/// Inventory reports for display
pub mod report;
/// Usage sessions
pub mod session;
/// Point-in-time balance snapshots
pub mod snapshot;
