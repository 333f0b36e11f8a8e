//! Tally
//!
//! Tally is the billing core of a retail point-of-sale client: an immutable cart,
//! per-line GST and cart discount pricing, checkout validation, and tax invoice
//! and thermal receipt rendering.

pub mod cart;
pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod invoices;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod store;
