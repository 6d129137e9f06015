//! `procura-core`: shared building blocks for the procure-to-pay record store.
//!
//! This crate contains identifiers and the error model only (no storage, no IO).

pub mod error;
pub mod id;

pub use error::{ProcureError, ProcureResult};
pub use id::{InvocationId, ItemId, OrderId, SupplierId};
