//! Billing session
//!
//! One cashier's active transaction. The session owns the cart and keeps its
//! [`PricedTotals`] in step with every mutation, so whatever is displayed is
//! always what would be charged.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use tally::{
    cart::Cart,
    discounts::Discount,
    invoices::Invoice,
    payments::PaymentMode,
    pricing::{PricedTotals, price},
    products::{Product, ProductId},
};
use tracing::debug;

use crate::{
    catalog::CatalogLookup,
    checkout::{CheckoutError, CheckoutService},
    http::ApiError,
    printing::ReceiptPrinter,
};

/// Default number of rows returned by [`BillingSession::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Active cart, its totals and the services needed to bill it.
pub struct BillingSession {
    cart: Cart,
    totals: PricedTotals,
    catalog: Arc<dyn CatalogLookup>,
    checkout: Arc<CheckoutService>,
    printer: Option<ReceiptPrinter>,
}

impl fmt::Debug for BillingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillingSession")
            .field("cart", &self.cart)
            .field("totals", &self.totals)
            .field("printer", &self.printer)
            .finish_non_exhaustive()
    }
}

impl BillingSession {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogLookup>, checkout: Arc<CheckoutService>) -> Self {
        let cart = Cart::new();
        let totals = price(&cart);

        Self {
            cart,
            totals,
            catalog,
            checkout,
            printer: None,
        }
    }

    /// Print a receipt after each successful checkout.
    #[must_use]
    pub fn with_printer(mut self, printer: ReceiptPrinter) -> Self {
        self.printer = Some(printer);
        self
    }

    /// Current cart snapshot.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Totals for [`BillingSession::cart`].
    pub fn totals(&self) -> &PricedTotals {
        &self.totals
    }

    /// Search the catalog, keeping at most `limit` results.
    ///
    /// A blank query returns nothing without calling the catalog.
    ///
    /// # Errors
    ///
    /// Returns the catalog's [`ApiError`].
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Product>, ApiError> {
        let query = query.trim();

        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut products = self.catalog.search(query).await?;

        products.truncate(limit);

        Ok(products)
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) {
        debug!(product = %product.id, "add to cart");

        self.apply(self.cart.add(product));
    }

    /// Change a line's quantity by `delta`, never below 1.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        debug!(product = %id, delta, "update quantity");

        self.apply(self.cart.update_quantity(id, delta));
    }

    /// Override a line's unit price.
    pub fn update_price(&mut self, id: &ProductId, unit_price: Decimal) {
        debug!(product = %id, %unit_price, "update price");

        self.apply(self.cart.update_price(id, unit_price));
    }

    /// Drop a line.
    pub fn remove(&mut self, id: &ProductId) {
        debug!(product = %id, "remove from cart");

        self.apply(self.cart.remove(id));
    }

    /// Start over with an empty cart.
    pub fn clear(&mut self) {
        debug!("clear cart");

        self.apply(self.cart.clear());
    }

    pub fn set_customer(&mut self, name: Option<&str>, phone: &str) {
        debug!("set customer");

        self.apply(self.cart.with_customer(name, phone));
    }

    pub fn set_discount(&mut self, discount: Discount) {
        debug!(kind = ?discount.kind(), value = %discount.value(), "set discount");

        self.apply(self.cart.with_discount(discount));
    }

    pub fn set_payment_mode(&mut self, payment_mode: PaymentMode) {
        debug!(%payment_mode, "set payment mode");

        self.apply(self.cart.with_payment_mode(payment_mode));
    }

    /// Submit the cart.
    ///
    /// On success the cart is cleared and, when a printer is attached, the
    /// receipt printed. Print failures are logged and do not affect the result.
    /// On failure the cart is left as it was so the cashier can retry.
    ///
    /// # Errors
    ///
    /// Returns the [`CheckoutError`] from [`CheckoutService::checkout`].
    pub async fn checkout(&mut self) -> Result<Invoice, CheckoutError> {
        let invoice = self.checkout.checkout(&self.cart, &self.totals).await?;

        self.apply(self.cart.clear());

        if let Some(printer) = &self.printer {
            printer.print_or_warn(&invoice);
        }

        Ok(invoice)
    }

    fn apply(&mut self, cart: Cart) {
        self.totals = price(&cart);
        self.cart = cart;
    }
}
