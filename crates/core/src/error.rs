//! Error model shared by every layer of the record store.

use thiserror::Error;

/// Result type used across the workspace.
pub type ProcureResult<T> = Result<T, ProcureError>;

/// Error returned by lifecycle operations.
///
/// Callers only ever see a payload or one of these; there is no warning channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcureError {
    /// The call carried fewer positional arguments than the operation needs.
    #[error("{operation}: missing argument {position} ({name})")]
    MissingArgument {
        operation: &'static str,
        position: usize,
        name: &'static str,
    },

    /// A lookup where absence is an error (order by ID, supplier inventory).
    #[error("not found: {0}")]
    NotFound(String),

    /// The ledger rejected a read or a write.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    /// A stored blob or an inbound payload could not be decoded.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// A table or response could not be encoded.
    #[error("encode failure: {0}")]
    EncodeFailure(String),
}

impl ProcureError {
    pub fn missing_argument(operation: &'static str, position: usize, name: &'static str) -> Self {
        Self::MissingArgument {
            operation,
            position,
            name,
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::PersistenceFailure(msg.into())
    }

    pub fn decode(msg: impl core::fmt::Display) -> Self {
        Self::DecodeFailure(msg.to_string())
    }

    pub fn encode(msg: impl core::fmt::Display) -> Self {
        Self::EncodeFailure(msg.to_string())
    }
}
