//! Payment modes

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the customer settles the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMode {
    /// Cash at the counter
    #[default]
    Cash,

    /// Debit or credit card
    Card,

    /// Unified Payments Interface transfer
    #[serde(rename = "UPI", alias = "Upi")]
    Upi,
}

impl PaymentMode {
    /// Label printed on receipts and sent to the ledger.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
