//! Tracing/logging setup shared by binaries.

/// Initialize process-wide logging with the format chosen by `PROCURA_LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

pub mod tracing;

pub use tracing::LogFormat;
