use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::r#trait::{Ledger, LedgerError};

/// One revision of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Per-key, starts at 1.
    pub revision: u64,
    pub value: Vec<u8>,
    pub written_at: DateTime<Utc>,
}

/// In-memory append-only ledger.
///
/// Every `put` appends a revision; `get` returns the newest. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    keys: RwLock<HashMap<String, Vec<LedgerEntry>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All revisions of `key`, oldest first.
    pub fn history(&self, key: &str) -> Result<Vec<LedgerEntry>, LedgerError> {
        let keys = self
            .keys
            .read()
            .map_err(|_| LedgerError::Unavailable("lock poisoned".to_string()))?;
        Ok(keys.get(key).cloned().unwrap_or_default())
    }

    /// Number of revisions written under `key`.
    pub fn revision(&self, key: &str) -> Result<u64, LedgerError> {
        Ok(self.history(key)?.last().map(|e| e.revision).unwrap_or(0))
    }
}

impl Ledger for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        let keys = self
            .keys
            .read()
            .map_err(|_| LedgerError::read(key, "lock poisoned"))?;
        Ok(keys
            .get(key)
            .and_then(|revisions| revisions.last())
            .map(|e| e.value.clone()))
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        let mut keys = self
            .keys
            .write()
            .map_err(|_| LedgerError::write(key, "lock poisoned"))?;

        let revisions = keys.entry(key.to_string()).or_default();
        let revision = revisions.last().map(|e| e.revision).unwrap_or(0) + 1;
        revisions.push(LedgerEntry {
            revision,
            value,
            written_at: Utc::now(),
        });
        Ok(())
    }
}
