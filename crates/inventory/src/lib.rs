//! Supplier inventory (items offered by each supplier).
//!
//! Pure in-memory model; persistence lives in `procura-infra`.

pub mod item;

pub use item::{InventoryTable, Item, seed_catalog};
