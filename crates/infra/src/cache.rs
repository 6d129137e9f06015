//! Collection cache: hydrates the two tables from the ledger and writes them back.
//!
//! Tables are returned by value. Nothing is kept between calls, so every caller
//! works on a copy loaded fresh from the ledger.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use procura_core::{ProcureError, ProcureResult};
use procura_inventory::InventoryTable;
use procura_purchasing::OrderTable;

use crate::config::StoreConfig;
use crate::ledger::Ledger;

#[derive(Debug)]
pub struct CollectionCache<L> {
    ledger: L,
    config: StoreConfig,
}

impl<L> CollectionCache<L> {
    pub fn new(ledger: L, config: StoreConfig) -> Self {
        Self { ledger, config }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl<L: Ledger> CollectionCache<L> {
    /// Load the order table. An absent key is created as an empty table.
    pub fn load_orders(&self) -> ProcureResult<OrderTable> {
        self.load(&self.config.orders_key)
    }

    pub fn save_orders(&self, orders: &OrderTable) -> ProcureResult<()> {
        self.save(&self.config.orders_key, orders)
    }

    /// Load the inventory table. An absent key is created as an empty table.
    pub fn load_inventory(&self) -> ProcureResult<InventoryTable> {
        self.load(&self.config.inventory_key)
    }

    pub fn save_inventory(&self, inventory: &InventoryTable) -> ProcureResult<()> {
        self.save(&self.config.inventory_key, inventory)
    }

    fn load<T>(&self, key: &str) -> ProcureResult<T>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        match self.ledger.get(key)? {
            // A zero-length value counts as absent.
            Some(bytes) if !bytes.is_empty() => {
                debug!(key, bytes = bytes.len(), "table exists");
                serde_json::from_slice(&bytes)
                    .map_err(|e| ProcureError::decode(format!("table '{key}': {e}")))
            }
            _ => {
                debug!(key, "table does not exist; creating");
                let empty = T::default();
                self.save(key, &empty)?;
                Ok(empty)
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, table: &T) -> ProcureResult<()> {
        let bytes = serde_json::to_vec(table)
            .map_err(|e| ProcureError::encode(format!("table '{key}': {e}")))?;
        debug!(key, bytes = bytes.len(), "saving table");
        self.ledger.put(key, bytes)?;
        Ok(())
    }
}
