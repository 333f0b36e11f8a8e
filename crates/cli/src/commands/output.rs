//! Console output: tables for listings and a stdout print surface.

use std::io::{self, Write};

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tally::{
    cart::Cart,
    invoices::Invoice,
    pricing::PricedTotals,
    products::Product,
    receipt::{Document, format_amount, format_money, local_timestamp},
    store::StoreProfile,
};
use tally_app::printing::{PrintError, PrintSurface};

/// Prints receipts to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ConsoleSurface;

impl PrintSurface for ConsoleSurface {
    fn print(&self, _invoice_number: &str, document: &Document) -> Result<(), PrintError> {
        let mut handle = io::stdout().lock();

        writeln!(handle, "{document}")?;
        handle.flush()?;

        Ok(())
    }
}

fn finish(builder: Builder, numeric_from: usize) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(numeric_from..), Alignment::right());

    table.to_string()
}

/// Catalog search results.
pub(crate) fn products_table(products: &[Product]) -> String {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Name", "Unit", "Price", "GST %", "Stock"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.unit_label().to_string(),
            format_amount(product.unit_price),
            product.tax_percent.normalize().to_string(),
            product.stock.to_string(),
        ]);
    }

    finish(builder, 3)
}

/// Cart lines followed by the running totals.
pub(crate) fn cart_table(cart: &Cart, totals: &PricedTotals, profile: &StoreProfile) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Qty", "Rate", "GST %", "Amount"]);

    for (index, line) in cart.iter().enumerate() {
        builder.push_record([
            (index + 1).to_string(),
            line.name().to_string(),
            line.quantity().to_string(),
            format_amount(line.unit_price()),
            line.tax_percent().normalize().to_string(),
            format_amount(line.line_total()),
        ]);
    }

    let mut summary = Builder::default();

    summary.push_record(["Subtotal".to_string(), format_amount(totals.subtotal)]);
    summary.push_record(["GST".to_string(), format_amount(totals.tax_total)]);

    if totals.discount_amount > Decimal::ZERO {
        summary.push_record([
            "Discount".to_string(),
            format!("-{}", format_amount(totals.discount_amount)),
        ]);
    }

    summary.push_record([
        "Net payable".to_string(),
        format_money(totals.net_amount, profile.currency()),
    ]);

    format!("{}\n{}", finish(builder, 2), finish(summary, 1))
}

/// Invoice history.
pub(crate) fn invoices_table(invoices: &[Invoice], profile: &StoreProfile) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Invoice", "Date", "Customer", "Phone", "Payment", "Items", "Net"]);

    for invoice in invoices {
        builder.push_record([
            invoice.invoice_number.clone(),
            local_timestamp(invoice, profile),
            invoice.customer_name.clone().unwrap_or_default(),
            invoice.customer_phone.clone(),
            invoice.payment_mode.to_string(),
            invoice.item_count().to_string(),
            format_amount(invoice.net_amount),
        ]);
    }

    finish(builder, 5)
}

#[cfg(test)]
mod tests {
    use tally::{
        discounts::Discount,
        pricing::price,
        products::{Product, ProductId},
    };

    use super::*;

    fn rice() -> Product {
        Product {
            id: ProductId::from("rice-5kg"),
            name: "Basmati Rice".to_string(),
            unit_price: Decimal::from(100),
            tax_percent: Decimal::new(50, 1),
            stock: 12,
            unit: Some("bag".to_string()),
        }
    }

    #[test]
    fn products_table_lists_every_field() {
        let table = products_table(&[rice()]);

        assert!(table.contains("rice-5kg"));
        assert!(table.contains("Basmati Rice"));
        assert!(table.contains("bag"));
        assert!(table.contains("100.00"));
        assert!(!table.contains("5.0"), "tax percent is normalised: {table}");
    }

    #[test]
    fn cart_table_shows_discount_only_when_set() {
        let cart = Cart::new().add(&rice()).add(&rice());
        let profile = StoreProfile::default();

        let plain = cart_table(&cart, &price(&cart), &profile);

        assert!(plain.contains("200.00"));
        assert!(plain.contains("10.00"));
        assert!(!plain.contains("Discount"));

        let discounted = cart.with_discount(Discount::amount(Decimal::from(10)));
        let table = cart_table(&discounted, &price(&discounted), &profile);

        assert!(table.contains("Discount"));
        assert!(table.contains("-10.00"));
    }
}
