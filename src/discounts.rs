//! Discounts
//!
//! A cart carries at most one discount, applied after tax.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiscountType {
    /// A flat amount in currency units
    #[default]
    #[serde(alias = "amount")]
    Amount,

    /// Percent points of the tax-inclusive total
    #[serde(alias = "percent")]
    Percent,
}

/// Cart-level discount.
///
/// Built only through [`Discount::new`] so the value is never negative and a
/// percentage never exceeds 100.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Discount {
    kind: DiscountType,
    value: Decimal,
}

impl Discount {
    /// No discount.
    pub const NONE: Self = Self {
        kind: DiscountType::Amount,
        value: Decimal::ZERO,
    };

    /// Create a discount; negative values are clamped to zero and
    /// percentages to 100.
    pub fn new(kind: DiscountType, value: Decimal) -> Self {
        let value = value.max(Decimal::ZERO);

        let value = match kind {
            DiscountType::Amount => value,
            DiscountType::Percent => value.min(Decimal::ONE_HUNDRED),
        };

        Self { kind, value }
    }

    /// Flat amount off (e.g. "50 off").
    pub fn amount(value: Decimal) -> Self {
        Self::new(DiscountType::Amount, value)
    }

    /// Percentage off the tax-inclusive total (e.g. "10% off").
    pub fn percent(points: Decimal) -> Self {
        Self::new(DiscountType::Percent, points)
    }

    /// Discount type.
    pub fn kind(&self) -> DiscountType {
        self.kind
    }

    /// Discount value after clamping.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Amount taken off a tax-inclusive `gross` total.
    ///
    /// A flat amount is not capped at `gross`; callers clamp the payable
    /// amount instead. A percentage never takes off more than `gross`.
    pub fn amount_off(&self, gross: Decimal) -> Decimal {
        match self.kind {
            DiscountType::Amount => self.value,
            DiscountType::Percent => percent_of(self.value, gross),
        }
    }
}

/// Apply a rate expressed in percent points (e.g. `5` for 5%) to `amount`.
pub fn percent_of(points: Decimal, amount: Decimal) -> Decimal {
    // `Percentage` is a fraction, so convert points first.
    Percentage::from(points / Decimal::ONE_HUNDRED) * amount
}
