//! Full-page GST tax invoice.

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{invoices::Invoice, store::StoreProfile};

use super::{
    format_amount, format_money,
    layout::{center, justify, rule, width, wrap},
    local_timestamp,
};

/// Narrowest page the letterhead is laid out on.
const MIN_PAGE_WIDTH: usize = 64;

const WALK_IN: &str = "Walk-in customer";

pub(super) fn render(invoice: &Invoice, profile: &StoreProfile) -> String {
    let table = items_table(invoice);
    let page = table
        .lines()
        .map(width)
        .max()
        .unwrap_or(0)
        .max(MIN_PAGE_WIDTH);

    let mut lines = Vec::new();

    lines.push(center(&profile.business_name().to_uppercase(), page));
    lines.extend(wrap(profile.address(), page).iter().map(|line| center(line, page)));
    lines.push(center(
        &format!("Phone: {} | GSTIN: {}", profile.phone(), profile.tax_id()),
        page,
    ));
    lines.push(rule('=', page));
    lines.push(center("TAX INVOICE", page));
    lines.push(rule('-', page));

    lines.push(justify(
        &format!("Invoice No: {}", invoice.invoice_number),
        &format!("Date: {}", local_timestamp(invoice, profile)),
        page,
    ));
    lines.push(justify(
        &format!("Bill To: {}", customer_name(invoice)),
        &format!("Payment: {}", invoice.payment_mode),
        page,
    ));
    lines.push(format!("Phone: {}", invoice.customer_phone));
    lines.push(String::new());

    lines.extend(table.lines().map(str::to_string));
    lines.push(String::new());

    lines.extend(summary_lines(invoice, profile, page));

    lines.push(rule('=', page));
    lines.push(center("Thank you for your business!", page));
    lines.push(center("This is a computer generated invoice.", page));

    let mut body = lines.join("\n");
    body.push('\n');

    body
}

fn customer_name(invoice: &Invoice) -> &str {
    invoice
        .customer_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(WALK_IN)
}

fn items_table(invoice: &Invoice) -> String {
    let mut builder = Builder::default();

    builder.push_record(["#", "Item", "Qty", "Rate", "Amount"]);

    for (idx, item) in invoice.items.iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            item.name.clone(),
            item.quantity.to_string(),
            format_amount(item.price),
            format_amount(item.total),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());

    table.to_string()
}

/// Right-aligned label/value block under the items table.
fn summary_lines(invoice: &Invoice, profile: &StoreProfile, page: usize) -> Vec<String> {
    let mut rows = vec![
        ("Subtotal:", format_amount(invoice.total_amount)),
        ("GST:", format_amount(invoice.gst_amount)),
    ];

    if invoice.has_discount() {
        rows.push((
            "Discount:",
            format!("-{}", format_amount(invoice.discount_amount)),
        ));
    }

    rows.push((
        "Net Payable:",
        format_money(invoice.net_amount, profile.currency()),
    ));

    let label_width = rows.iter().map(|(label, _)| width(label)).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| width(value)).max().unwrap_or(0);

    rows.into_iter()
        .map(|(label, value)| {
            let line = format!("{label:>label_width$}  {value:>value_width$}");

            format!("{line:>page$}")
        })
        .collect()
}
