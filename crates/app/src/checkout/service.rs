//! Checkout service.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tally::{cart::Cart, checkout::CheckoutRequest, invoices::Invoice, pricing::PricedTotals};
use tracing::{info, warn};

use crate::{checkout::errors::CheckoutError, ledger::Ledger};

/// Submits validated carts to the ledger, one at a time.
pub struct CheckoutService {
    ledger: Arc<dyn Ledger>,
    busy: AtomicBool,
}

impl fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutService")
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

impl CheckoutService {
    #[must_use]
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self {
            ledger,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a submission is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validate `cart` and submit it with its `totals`.
    ///
    /// Retries are not deduplicated: submitting the same cart twice creates
    /// two invoices.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Validation`]: the cart is empty or the phone is malformed.
    /// - [`CheckoutError::InFlight`]: another checkout has not finished.
    /// - [`CheckoutError::Submission`]: the ledger call failed.
    pub async fn checkout(
        &self,
        cart: &Cart,
        totals: &PricedTotals,
    ) -> Result<Invoice, CheckoutError> {
        let request = CheckoutRequest::new(cart, totals)?;

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            return Err(CheckoutError::InFlight);
        };

        info!(
            items = request.items.len(),
            net_amount = %request.net_amount,
            payment_mode = %request.payment_mode,
            "submitting checkout"
        );

        match self.ledger.submit(&request).await {
            Ok(invoice) => {
                info!(invoice = %invoice.invoice_number, "checkout complete");

                Ok(invoice)
            }
            Err(error) => {
                warn!(%error, "checkout submission failed");

                Err(CheckoutError::Submission(error))
            }
        }
    }
}

/// Holds the busy flag; released on drop, whichever way the checkout ends.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
