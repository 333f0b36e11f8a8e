//! Cart line items

use rust_decimal::Decimal;

use crate::{
    discounts::percent_of,
    products::{Product, ProductId},
};

/// One cart row: a single product, its quantity and effective unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    product_id: ProductId,
    name: String,
    unit_price: Decimal,
    quantity: u32,
    tax_percent: Decimal,
}

impl CartLineItem {
    /// Start a line for `product` with quantity 1 at the catalog price and tax rate.
    ///
    /// A negative price becomes zero and the tax rate is held to `0..=100`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price.max(Decimal::ZERO),
            quantity: 1,
            tax_percent: product
                .tax_percent
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
        }
    }

    /// Product this line is keyed by.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Product name at the time it was added.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Effective unit price (catalog price or a manual override).
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Quantity, always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Tax rate in percent points, fixed when the line was created.
    pub fn tax_percent(&self) -> Decimal {
        self.tax_percent
    }

    /// `quantity × unit_price`, saturating at [`Decimal::MAX`].
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }

    /// Tax on this line at its own rate.
    pub fn tax_amount(&self) -> Decimal {
        percent_of(self.tax_percent, self.line_total())
    }

    pub(super) fn adjust_quantity(&mut self, delta: i64) {
        let next = i64::from(self.quantity).saturating_add(delta).max(1);

        self.quantity = u32::try_from(next).unwrap_or(u32::MAX);
    }

    pub(super) fn set_unit_price(&mut self, price: Decimal) {
        self.unit_price = price.max(Decimal::ZERO);
    }
}
