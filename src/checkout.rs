//! Checkout requests
//!
//! Local validation and the wire body submitted to the ledger. Nothing here
//! performs I/O: a request that fails validation is never built, so it can
//! never be sent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLineItem},
    payments::PaymentMode,
    pricing::PricedTotals,
    products::ProductId,
};

/// Required length of a customer phone number.
pub const PHONE_DIGITS: usize = 10;

/// Reasons a cart cannot be checked out.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The cart has no lines.
    #[error("cart is empty; add at least one item before checkout")]
    EmptyCart,

    /// No customer phone was entered.
    #[error("customer phone is required")]
    MissingCustomerPhone,

    /// The phone is not exactly ten digits.
    #[error("customer phone must be exactly 10 digits, got {0:?}")]
    InvalidCustomerPhone(String),
}

impl ValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyCart => "items",
            ValidationError::MissingCustomerPhone | ValidationError::InvalidCustomerPhone(_) => {
                "customerPhone"
            }
        }
    }
}

/// Check a phone number is exactly [`PHONE_DIGITS`] ASCII digits.
///
/// # Errors
///
/// - [`ValidationError::MissingCustomerPhone`]: the phone is blank.
/// - [`ValidationError::InvalidCustomerPhone`]: wrong length or non-digit characters.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::MissingCustomerPhone);
    }

    if phone.len() == PHONE_DIGITS && phone.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCustomerPhone(phone.to_string()))
    }
}

/// Line snapshot sent with a checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name
    pub name: String,

    /// Effective unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity
    pub quantity: u32,

    /// Line total
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<&CartLineItem> for CheckoutItem {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product_id().clone(),
            name: line.name().to_string(),
            price: line.unit_price(),
            quantity: line.quantity(),
            total: line.line_total(),
        }
    }
}

/// Transaction body submitted to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Customer name, if entered
    pub customer_name: Option<String>,

    /// Customer phone, validated
    pub customer_phone: String,

    /// Line snapshot
    pub items: Vec<CheckoutItem>,

    /// Subtotal before tax
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    /// Combined tax
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_amount: Decimal,

    /// Discount taken off
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,

    /// Amount payable
    #[serde(with = "rust_decimal::serde::float")]
    pub net_amount: Decimal,

    /// Payment mode
    pub payment_mode: PaymentMode,
}

impl CheckoutRequest {
    /// Validate `cart` and package it with its `totals`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the cart is empty or the customer
    /// phone is missing or malformed.
    pub fn new(cart: &Cart, totals: &PricedTotals) -> Result<Self, ValidationError> {
        if cart.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        validate_phone(cart.customer_phone())?;

        Ok(Self {
            customer_name: cart.customer_name().map(str::to_string),
            customer_phone: cart.customer_phone().to_string(),
            items: cart.iter().map(CheckoutItem::from).collect(),
            total_amount: totals.subtotal,
            gst_amount: totals.tax_total,
            discount_amount: totals.discount_amount,
            net_amount: totals.net_amount,
            payment_mode: cart.payment_mode(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{discounts::Discount, pricing::price, products::Product};

    use super::*;

    fn cart() -> Cart {
        let rice = Product {
            id: ProductId::from("rice"),
            name: "Rice".to_string(),
            unit_price: Decimal::from(100),
            tax_percent: Decimal::from(5),
            stock: 5,
            unit: None,
        };

        Cart::new().add(&rice).with_customer(Some("Meena"), "9876543210")
    }

    #[test]
    fn accepts_ten_digit_phone() {
        assert_eq!(validate_phone("9876543210"), Ok(()));
    }

    #[test]
    fn rejects_short_long_and_non_digit_phones() {
        for phone in ["12345", "98765432101", "98765-4321", "98765432１0", "abcdefghij"] {
            assert_eq!(
                validate_phone(phone),
                Err(ValidationError::InvalidCustomerPhone(phone.to_string())),
                "{phone} should be rejected"
            );
        }
    }

    #[test]
    fn blank_phone_is_missing() {
        assert_eq!(validate_phone("  "), Err(ValidationError::MissingCustomerPhone));
        assert_eq!(ValidationError::MissingCustomerPhone.field(), "customerPhone");
    }

    #[test]
    fn empty_cart_is_rejected_first() {
        let empty = Cart::new().with_customer(None, "123");

        let result = CheckoutRequest::new(&empty, &price(&empty));

        assert_eq!(result, Err(ValidationError::EmptyCart));
        assert_eq!(ValidationError::EmptyCart.field(), "items");
    }

    #[test]
    fn bad_phone_is_rejected() {
        let cart = cart().with_customer(None, "12345");

        let result = CheckoutRequest::new(&cart, &price(&cart));

        assert_eq!(
            result,
            Err(ValidationError::InvalidCustomerPhone("12345".to_string()))
        );
    }

    #[test]
    fn builds_wire_body() -> TestResult {
        let cart = cart().with_discount(Discount::amount(Decimal::from(5)));
        let request = CheckoutRequest::new(&cart, &price(&cart))?;

        assert_eq!(
            serde_json::to_value(&request)?,
            json!({
                "customerName": "Meena",
                "customerPhone": "9876543210",
                "items": [
                    { "productId": "rice", "name": "Rice", "price": 100.0, "quantity": 1, "total": 100.0 }
                ],
                "totalAmount": 100.0,
                "gstAmount": 5.0,
                "discountAmount": 5.0,
                "netAmount": 100.0,
                "paymentMode": "Cash"
            })
        );

        Ok(())
    }
}
