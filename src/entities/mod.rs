//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod item;
pub mod purchase;
pub mod session;
pub mod snapshot;
pub mod system_state;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use item::{Column as ItemColumn, Entity as Item, ItemType, Model as ItemModel};
pub use purchase::{Column as PurchaseColumn, Entity as Purchase, Model as PurchaseModel};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use snapshot::{Column as SnapshotColumn, Entity as Snapshot, Model as SnapshotModel};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
    TransactionType,
};
