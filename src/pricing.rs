//! Pricing
//!
//! Totals are a pure function of the cart and are never stored on it.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::cart::Cart;

/// Totals derived from a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PricedTotals {
    /// Sum of line totals, before tax
    pub subtotal: Decimal,

    /// Sum of per-line tax
    pub tax_total: Decimal,

    /// Amount taken off by the cart discount
    pub discount_amount: Decimal,

    /// Amount payable, rounded to whole currency units and never negative
    pub net_amount: Decimal,
}

impl PricedTotals {
    /// Subtotal plus tax, before any discount.
    pub fn gross(&self) -> Decimal {
        saturating_add(self.subtotal, self.tax_total)
    }
}

/// Price a cart.
///
/// Tax is computed per line at that line's own rate. A percentage discount
/// applies to the tax-inclusive total. The net amount is rounded half-up to
/// whole units, then clamped at zero. Sums saturate at [`Decimal::MAX`]
/// rather than overflow.
pub fn price(cart: &Cart) -> PricedTotals {
    let (subtotal, tax_total) = cart
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(subtotal, tax), line| {
            (
                saturating_add(subtotal, line.line_total()),
                saturating_add(tax, line.tax_amount()),
            )
        });

    let gross = saturating_add(subtotal, tax_total);
    let discount_amount = cart.discount().amount_off(gross);

    PricedTotals {
        subtotal,
        tax_total,
        discount_amount,
        net_amount: round_payable(gross - discount_amount),
    }
}

/// Round to whole currency units, half away from zero, and clamp at zero.
pub fn round_payable(amount: Decimal) -> Decimal {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ZERO)
}

// Every term priced here is non-negative, so overflow is always upwards.
fn saturating_add(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_add(rhs).unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use crate::{
        cart::CartLineItem,
        discounts::Discount,
        products::{Product, ProductId},
    };

    use super::*;

    fn product(id: &str, price: Decimal, tax: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: id.to_string(),
            unit_price: price,
            tax_percent: Decimal::from(tax),
            stock: 1,
            unit: None,
        }
    }

    #[test]
    fn empty_cart_prices_to_zero() {
        assert_eq!(price(&Cart::new()), PricedTotals::default());
    }

    #[test]
    fn subtotal_is_sum_of_line_totals() {
        let a = product("a", Decimal::new(1999, 2), 0);
        let b = product("b", Decimal::new(501, 2), 0);
        let cart = Cart::new().add(&a).add(&a).add(&b);

        let expected: Decimal = cart.iter().map(CartLineItem::line_total).sum();

        assert_eq!(price(&cart).subtotal, expected);
        assert_eq!(price(&cart).subtotal, Decimal::new(4499, 2));
    }

    #[test]
    fn tax_is_computed_per_line() {
        let cart = Cart::new()
            .add(&product("a", Decimal::from(100), 18))
            .add(&product("b", Decimal::from(100), 5));

        let totals = price(&cart);

        // A blended rate over the subtotal would give a different figure.
        assert_eq!(totals.tax_total, Decimal::from(23));
        assert_eq!(totals.net_amount, Decimal::from(223));
    }

    #[test]
    fn percent_discount_includes_tax() {
        let cart = Cart::new()
            .add(&product("a", Decimal::from(1000), 10))
            .with_discount(Discount::percent(Decimal::from(10)));

        let totals = price(&cart);

        assert_eq!(totals.discount_amount, Decimal::from(110));
        assert_eq!(totals.net_amount, Decimal::from(990));
    }

    #[test]
    fn net_is_never_negative() {
        let cart = Cart::new()
            .add(&product("a", Decimal::from(10), 0))
            .with_discount(Discount::amount(Decimal::from(1_000_000)));

        assert_eq!(price(&cart).net_amount, Decimal::ZERO);

        let percent = cart.with_discount(Discount::percent(Decimal::from(250)));
        let totals = price(&percent);

        assert_eq!(totals.net_amount, Decimal::ZERO);
        assert_eq!(totals.discount_amount, totals.gross());
    }

    #[test]
    fn extreme_prices_saturate_instead_of_overflowing() {
        let p = product("gold", Decimal::from(100), 5);
        let cart = Cart::new()
            .add(&p)
            .add(&p)
            .update_price(&p.id, Decimal::MAX);

        let totals = price(&cart);

        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.gross(), Decimal::MAX);
        assert_eq!(totals.net_amount, Decimal::MAX);

        let bulk = Cart::new()
            .add(&product("bulk", Decimal::from_i128_with_scale(10_i128.pow(21), 0), 18))
            .update_quantity(&ProductId::from("bulk"), i64::from(u32::MAX));

        let totals = price(&bulk);

        assert_eq!(totals.subtotal, Decimal::MAX);
        assert_eq!(totals.net_amount, Decimal::MAX);

        let discounted = bulk.with_discount(Discount::percent(Decimal::from(10)));

        assert!(price(&discounted).net_amount < Decimal::MAX);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_payable(Decimal::new(1845, 1)), Decimal::from(185));
        assert_eq!(round_payable(Decimal::new(1844, 1)), Decimal::from(184));
        assert_eq!(round_payable(Decimal::new(25, 1)), Decimal::from(3));
        assert_eq!(round_payable(Decimal::new(-5, 1)), Decimal::ZERO);
    }

    #[test]
    fn price_override_flows_into_totals() {
        let p = product("a", Decimal::from(100), 5);
        let cart = Cart::new().add(&p).update_price(&p.id, Decimal::from(80));

        let totals = price(&cart);

        assert_eq!(totals.subtotal, Decimal::from(80));
        assert_eq!(totals.tax_total, Decimal::from(4));
        assert_eq!(totals.gross(), Decimal::from(84));
    }
}
