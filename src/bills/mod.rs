//! Bill Splitting
//!
//! In-memory bills, their items, and total calculation.
//!
//! - **types**: `Bill`, `Item`, `NewItem`
//! - **store**: `BillStore`, the shared async store
//! - **error**: Error types

pub mod error;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use store::{BillStore, StoreStats};
pub use types::{Bill, Item, NewItem, RecordId};
