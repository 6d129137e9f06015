//! Key-value ledger boundary.
//!
//! The record store only needs `get`/`put` by string key over one keyspace. Durability
//! and consensus are the backend's business.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{InMemoryLedger, LedgerEntry};
pub use r#trait::{Ledger, LedgerError};
