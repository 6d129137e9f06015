//! Infrastructure layer: ledger boundary, table persistence, lifecycle engine.

pub mod cache;
pub mod config;
pub mod engine;
pub mod ledger;

pub use cache::CollectionCache;
pub use config::StoreConfig;
pub use engine::{AttachOutcome, CreateOrderOutcome, LifecycleEngine};
pub use ledger::{InMemoryLedger, Ledger, LedgerError};
