//! Purchasing domain: purchase orders, shipping documents and goods receipt.
//!
//! Pure domain logic (no IO, no storage).

pub mod order;
pub mod receipt;

pub use order::{Attachment, INVOICED_STATUS, OrderTable, PurchaseOrder};
pub use receipt::{GnrMessage, ReceiptDecision, acceptance_threshold, parse_received_quantity};
