//! 32-column roll receipt.

use crate::{invoices::Invoice, store::StoreProfile};

use super::{
    format_amount, format_money,
    layout::{center, justify, rule, truncate, width, wrap},
    local_timestamp, tax_split,
};

/// Printable columns on a 58mm thermal roll.
pub const THERMAL_WIDTH: usize = 32;

const QTY_WIDTH: usize = 4;
const AMOUNT_WIDTH: usize = 11;
const ITEM_WIDTH: usize = THERMAL_WIDTH - QTY_WIDTH - AMOUNT_WIDTH;

pub(super) fn render(invoice: &Invoice, profile: &StoreProfile) -> String {
    let width = THERMAL_WIDTH;
    let mut lines = Vec::new();

    let letterhead = wrap(&profile.business_name().to_uppercase(), width)
        .into_iter()
        .chain(wrap(profile.address(), width));

    lines.extend(letterhead.map(|line| center(&line, width)));
    lines.push(center(&format!("Ph: {}", profile.phone()), width));
    lines.push(center(&format!("GSTIN: {}", profile.tax_id()), width));
    lines.push(rule('=', width));

    lines.push(justify(
        &format!("Bill: {}", invoice.short_number()),
        &local_timestamp(invoice, profile),
        width,
    ));

    if let Some(name) = customer_name(invoice) {
        lines.push(truncate(&format!("Customer: {name}"), width));
    }

    lines.push(truncate(&format!("Phone: {}", invoice.customer_phone), width));
    lines.push(rule('-', width));
    lines.extend(item_rows("Item", "Qty", "Amount"));
    lines.push(rule('-', width));

    for item in &invoice.items {
        let mut name = wrap(&item.name, ITEM_WIDTH - 1).into_iter();

        lines.extend(item_rows(
            &name.next().unwrap_or_default(),
            &item.quantity.to_string(),
            &format_amount(item.total),
        ));
        lines.extend(name);

        if item.quantity > 1 {
            lines.push(format!("  @ {}", format_amount(item.price)));
        }
    }

    lines.push(rule('-', width));
    lines.push(justify(
        "Subtotal",
        &format_amount(invoice.total_amount),
        width,
    ));

    for tax in tax_split(invoice.gst_amount) {
        lines.push(justify(tax.label, &format_amount(tax.amount), width));
    }

    if invoice.has_discount() {
        lines.push(justify(
            "Discount",
            &format!("-{}", format_amount(invoice.discount_amount)),
            width,
        ));
    }

    lines.push(rule('=', width));
    lines.push(justify(
        "NET PAYABLE",
        &format_money(invoice.net_amount, profile.currency()),
        width,
    ));
    lines.push(rule('=', width));
    lines.push(justify(
        &format!("Paid by: {}", invoice.payment_mode),
        &format!("Items: {}", invoice.item_count()),
        width,
    ));
    lines.push(String::new());
    lines.push(center("Thank you! Visit again.", width));

    let mut body = lines.join("\n");
    body.push('\n');

    body
}

fn customer_name(invoice: &Invoice) -> Option<&str> {
    invoice
        .customer_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// One item row, or two when the quantity and amount outgrow their columns.
///
/// Columns are always separated by at least one space; an amount that does
/// not fit next to the quantity moves to its own right-aligned line.
fn item_rows(item: &str, quantity: &str, amount: &str) -> Vec<String> {
    let quantity = format!(" {quantity:>width$}", width = QTY_WIDTH - 1);
    let amount = format!(" {amount:>width$}", width = AMOUNT_WIDTH - 1);

    if width(&quantity) + width(&amount) <= QTY_WIDTH + AMOUNT_WIDTH {
        let row = format!(
            "{item:<item_width$}{quantity}{amount}",
            item = truncate(item, ITEM_WIDTH - 1),
            item_width = ITEM_WIDTH,
        );

        return vec![row];
    }

    let item_width = THERMAL_WIDTH.saturating_sub(width(&quantity));

    vec![
        format!(
            "{item:<item_width$}{quantity}",
            item = truncate(item, item_width.saturating_sub(1)),
        ),
        format!(
            "{amount:>roll_width$}",
            amount = amount.trim_start(),
            roll_width = THERMAL_WIDTH,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{invoices::InvoiceLine, payments::PaymentMode};

    use super::*;

    fn invoice(discount: Decimal) -> Invoice {
        Invoice {
            invoice_number: "INV-2026-000042".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            customer_name: None,
            customer_phone: "9876543210".to_string(),
            items: vec![
                InvoiceLine {
                    product_id: None,
                    name: "Basmati Rice Premium Long Grain 5kg".to_string(),
                    price: Decimal::from(100),
                    quantity: 2,
                    total: Decimal::from(200),
                },
                InvoiceLine {
                    product_id: None,
                    name: "Salt".to_string(),
                    price: Decimal::from(20),
                    quantity: 1,
                    total: Decimal::from(20),
                },
            ],
            total_amount: Decimal::from(220),
            gst_amount: Decimal::from(11),
            discount_amount: discount,
            net_amount: Decimal::from(231) - discount,
            payment_mode: PaymentMode::Upi,
        }
    }

    fn bulk_invoice() -> Invoice {
        let mut invoice = invoice(Decimal::ZERO);

        invoice.items = vec![InvoiceLine {
            product_id: None,
            name: "Gold bar".to_string(),
            price: Decimal::from(1_500_000_000),
            quantity: 12_345,
            total: Decimal::from(18_517_500_000_000_u64),
        }];

        invoice
    }

    #[test]
    fn no_line_exceeds_roll_width() {
        for invoice in [invoice(Decimal::ZERO), bulk_invoice()] {
            let body = render(&invoice, &StoreProfile::default());

            for line in body.lines() {
                assert!(width(line) <= THERMAL_WIDTH, "{line:?} is too wide");
            }
        }
    }

    #[test]
    fn large_amounts_stay_apart_from_quantity() -> TestResult {
        let body = render(&bulk_invoice(), &StoreProfile::default());
        let mut lines = body.lines();

        let row = lines
            .find(|line| line.starts_with("Gold bar"))
            .ok_or("missing item row")?;
        let amount = lines.next().ok_or("missing amount line")?;

        assert!(row.ends_with(" 12345"), "{row:?}");
        assert!(!row.contains("18517500000000"));
        assert_eq!(amount.trim_start(), "18517500000000.00");
        assert_eq!(width(amount), THERMAL_WIDTH);

        Ok(())
    }

    #[test]
    fn oversized_quantity_keeps_a_separator() {
        let rows = item_rows("Nails", "4294967295", "1.00");

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| width(row) <= THERMAL_WIDTH));

        let rows = item_rows("Nails", "99", "1.00");

        assert_eq!(rows, ["Nails              99       1.00"]);
    }

    #[test]
    fn long_names_wrap_onto_following_lines() {
        let body = render(&invoice(Decimal::ZERO), &StoreProfile::default());

        assert!(body.contains("Basmati Rice        2     200.00"));
        assert!(body.contains("Premium Long"));
        assert!(body.contains("  @ 100.00"));
        assert!(!body.contains("@ 20.00"));
    }

    #[test]
    fn discount_line_only_when_discounted() {
        let plain = render(&invoice(Decimal::ZERO), &StoreProfile::default());
        let discounted = render(&invoice(Decimal::from(31)), &StoreProfile::default());

        assert!(!plain.contains("Discount"));
        assert!(discounted.contains("Discount"));
        assert!(discounted.contains("-31.00"));
    }

    #[test]
    fn prints_short_number_and_gst_halves() -> TestResult {
        let body = render(&invoice(Decimal::ZERO), &StoreProfile::default());

        assert!(body.contains("Bill: 000042"));
        assert!(body.contains("CGST"));
        assert!(body.contains("SGST"));
        assert_eq!(body.matches("5.50").count(), 2);
        assert!(body.contains("Paid by: UPI"));
        assert!(body.contains("Items: 3"));

        let net = body
            .lines()
            .find(|line| line.starts_with("NET PAYABLE"))
            .ok_or("missing net line")?;

        assert!(net.ends_with("231.00"));

        Ok(())
    }

    #[test]
    fn walk_in_customer_has_no_name_line() {
        let body = render(&invoice(Decimal::ZERO), &StoreProfile::default());

        assert!(!body.contains("Customer:"));
        assert!(body.contains("Phone: 9876543210"));
    }
}
