//! Store configuration (ledger keys).

/// Ledger key holding the serialized order table.
pub const DEFAULT_ORDERS_KEY: &str = "PurchaseOrderMap";

/// Ledger key holding the serialized inventory table.
pub const DEFAULT_INVENTORY_KEY: &str = "SupplierItemMap";

pub const ORDERS_KEY_ENV: &str = "PROCURA_ORDERS_KEY";
pub const INVENTORY_KEY_ENV: &str = "PROCURA_INVENTORY_KEY";

/// Which ledger keys back the two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub orders_key: String,
    pub inventory_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            orders_key: DEFAULT_ORDERS_KEY.to_string(),
            inventory_key: DEFAULT_INVENTORY_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Read keys from `PROCURA_ORDERS_KEY` / `PROCURA_INVENTORY_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset or blank values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: &str| match lookup(name) {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                tracing::debug!(variable = name, default, "using default ledger key");
                default.to_string()
            }
        };

        Self {
            orders_key: read(ORDERS_KEY_ENV, DEFAULT_ORDERS_KEY),
            inventory_key: read(INVENTORY_KEY_ENV, DEFAULT_INVENTORY_KEY),
        }
    }
}
