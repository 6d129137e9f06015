//! Goods-received note (GNR) decision.
//!
//! Purely advisory: evaluating a receipt never changes the order.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

const ACCEPTED_MESSAGE: &str =
    "GNR generated successfully as quantity received is at least 75% of what was requested";
const REJECTED_MESSAGE: &str =
    "GNR failed to generate as quantity received is less than 75% of what was requested";

/// Outcome of comparing a received quantity with the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptDecision {
    /// Short delivery, but at or above the threshold.
    Accepted,
    /// Short delivery below the threshold.
    Rejected,
    /// Received quantity is not less than requested; no note is produced.
    NotShort,
}

/// Integer 75% of `requested` (truncating toward zero). Defined for every `i64`.
pub fn acceptance_threshold(requested: i64) -> i64 {
    // |requested * 3 / 4| <= |requested|, so the narrowing cast is lossless.
    (i128::from(requested) * 3 / 4) as i64
}

/// Non-numeric input counts as zero received. Out-of-range numbers clamp to the
/// nearest `i64` bound.
pub fn parse_received_quantity(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(quantity) => quantity,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

impl ReceiptDecision {
    pub fn evaluate(requested: i64, received: i64) -> Self {
        if received >= requested {
            return ReceiptDecision::NotShort;
        }
        if received >= acceptance_threshold(requested) {
            ReceiptDecision::Accepted
        } else {
            ReceiptDecision::Rejected
        }
    }

    pub fn to_message(self) -> GnrMessage {
        match self {
            ReceiptDecision::Accepted => GnrMessage {
                generated: 1,
                message: ACCEPTED_MESSAGE.to_string(),
            },
            ReceiptDecision::Rejected => GnrMessage {
                generated: 0,
                message: REJECTED_MESSAGE.to_string(),
            },
            ReceiptDecision::NotShort => GnrMessage::default(),
        }
    }
}

/// Wire response for a goods receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GnrMessage {
    /// 1 when a note was generated, else 0.
    #[serde(rename = "isgenerated")]
    pub generated: u8,
    pub message: String,
}
