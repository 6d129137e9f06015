use std::sync::Arc;

use thiserror::Error;

use procura_core::ProcureError;

/// Ledger operation error.
///
/// Infrastructure failures only; callers see them as `ProcureError::PersistenceFailure`.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("read of key '{key}' failed: {reason}")]
    Read { key: String, reason: String },

    #[error("write of key '{key}' failed: {reason}")]
    Write { key: String, reason: String },

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    pub fn read(key: &str, reason: impl Into<String>) -> Self {
        Self::Read {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn write(key: &str, reason: impl Into<String>) -> Self {
        Self::Write {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<LedgerError> for ProcureError {
    fn from(value: LedgerError) -> Self {
        ProcureError::PersistenceFailure(value.to_string())
    }
}

/// Append-style durable key-value store.
///
/// Implementations must serialize `get`/`put` per key and give read-your-writes
/// per call. No multi-key transaction or compare-and-set is assumed.
pub trait Ledger: Send + Sync {
    /// Latest value under `key`, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a new value under `key`.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;
}

impl<L> Ledger for Arc<L>
where
    L: Ledger + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        (**self).put(key, value)
    }
}
