//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLineItem},
    checkout::{CheckoutItem, CheckoutRequest, ValidationError, validate_phone},
    discounts::{Discount, DiscountType},
    invoices::{Invoice, InvoiceLine},
    payments::PaymentMode,
    pricing::{PricedTotals, price},
    products::{Product, ProductId},
    receipt::{Document, Template, render},
    store::{StoreProfile, StoreProfileError},
};
