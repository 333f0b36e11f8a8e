//! Cart
//!
//! The active transaction. A [`Cart`] is an immutable value: every operation
//! returns a new snapshot and leaves the original untouched.

use rust_decimal::Decimal;

use crate::{
    discounts::Discount,
    payments::PaymentMode,
    products::{Product, ProductId},
};

mod line_item;

pub use line_item::CartLineItem;

/// Cart
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    lines: Vec<CartLineItem>,
    customer_name: Option<String>,
    customer_phone: String,
    discount: Discount,
    payment_mode: PaymentMode,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart has its quantity incremented instead of
    /// getting a second line.
    #[must_use]
    pub fn add(&self, product: &Product) -> Self {
        if self.line(&product.id).is_some() {
            return self.update_quantity(&product.id, 1);
        }

        let mut next = self.clone();

        next.lines.push(CartLineItem::from_product(product));

        next
    }

    /// Change a line's quantity by `delta`, never going below 1.
    ///
    /// Use [`Cart::remove`] to drop a line. Unknown ids leave the cart unchanged.
    #[must_use]
    pub fn update_quantity(&self, id: &ProductId, delta: i64) -> Self {
        self.map_line(id, |line| line.adjust_quantity(delta))
    }

    /// Override a line's unit price; negative prices are clamped to zero.
    #[must_use]
    pub fn update_price(&self, id: &ProductId, price: Decimal) -> Self {
        self.map_line(id, |line| line.set_unit_price(price))
    }

    /// Remove a line. Removing an absent product is a no-op.
    #[must_use]
    pub fn remove(&self, id: &ProductId) -> Self {
        let mut next = self.clone();

        next.lines.retain(|line| line.product_id() != id);

        next
    }

    /// Start over with an empty cart: lines, customer and discount are all reset.
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Attach customer contact details. A blank name is treated as absent.
    #[must_use]
    pub fn with_customer(&self, name: Option<&str>, phone: &str) -> Self {
        let mut next = self.clone();

        next.customer_name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        next.customer_phone = phone.trim().to_string();

        next
    }

    /// Replace the cart discount.
    #[must_use]
    pub fn with_discount(&self, discount: Discount) -> Self {
        let mut next = self.clone();

        next.discount = discount;

        next
    }

    /// Select the payment mode.
    #[must_use]
    pub fn with_payment_mode(&self, payment_mode: PaymentMode) -> Self {
        let mut next = self.clone();

        next.payment_mode = payment_mode;

        next
    }

    /// Find the line for a product.
    pub fn line(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.product_id() == id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLineItem> {
        self.lines.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Customer name, if one was entered.
    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    /// Customer phone as entered (may be empty).
    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    /// Cart discount.
    pub fn discount(&self) -> Discount {
        self.discount
    }

    /// Selected payment mode.
    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    fn map_line(&self, id: &ProductId, apply: impl FnOnce(&mut CartLineItem)) -> Self {
        let mut next = self.clone();

        if let Some(line) = next.lines.iter_mut().find(|line| line.product_id() == id) {
            apply(line);
        }

        next
    }
}
