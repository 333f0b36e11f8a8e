//! Checkout errors.

use tally::checkout::ValidationError;
use thiserror::Error;

use crate::http::ApiError;

/// Why a checkout did not produce an invoice. The cart is untouched in every case.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another checkout is still waiting on the ledger; nothing was sent.
    #[error("a checkout is already in progress")]
    InFlight,

    /// The ledger call failed; no invoice exists.
    #[error("checkout submission failed: {0}")]
    Submission(#[source] ApiError),
}

impl CheckoutError {
    /// Message suitable for showing to the cashier.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Validation(error) => error.to_string(),
            CheckoutError::InFlight => {
                "Checkout is already in progress. Please wait for it to finish.".to_string()
            }
            CheckoutError::Submission(error) => error.user_message(),
        }
    }
}

impl From<ApiError> for CheckoutError {
    fn from(error: ApiError) -> Self {
        Self::Submission(error)
    }
}
