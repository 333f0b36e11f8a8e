//! Receipt rendering
//!
//! Both templates are pure functions of an [`Invoice`] and a [`StoreProfile`]:
//! rendering the same invoice twice yields byte-identical documents, which is
//! what makes reprints possible.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use thiserror::Error;

use crate::{invoices::Invoice, store::StoreProfile};

mod layout;
mod tax_invoice;
mod thermal;

pub use thermal::THERMAL_WIDTH;

/// Timestamp format printed on every receipt.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Unknown template name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown receipt template {0:?}; expected `tax-invoice` or `thermal-receipt`")]
pub struct UnknownTemplate(pub String);

/// Receipt layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    /// Full-page GST tax invoice
    #[default]
    TaxInvoice,

    /// Narrow roll receipt for thermal printers
    ThermalReceipt,
}

impl Template {
    /// Every template, in menu order.
    pub const ALL: [Template; 2] = [Template::TaxInvoice, Template::ThermalReceipt];

    /// Machine name, used for file names and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Template::TaxInvoice => "tax-invoice",
            Template::ThermalReceipt => "thermal-receipt",
        }
    }

    /// Human readable name.
    pub fn title(self) -> &'static str {
        match self {
            Template::TaxInvoice => "Tax Invoice",
            Template::ThermalReceipt => "Thermal Receipt",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Template {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();

        Template::ALL
            .into_iter()
            .find(|template| template.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

/// A rendered, print-ready document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    template: Template,
    title: String,
    body: String,
}

impl Document {
    /// Layout the document was rendered with.
    pub fn template(&self) -> Template {
        self.template
    }

    /// Window or job title, e.g. `Tax Invoice INV-2026-000123`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rendered text, newline terminated.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Widest line, in columns.
    pub fn width(&self) -> usize {
        self.body.lines().map(layout::width).max().unwrap_or(0)
    }

    /// Consume the document, returning its body.
    pub fn into_body(self) -> String {
        self.body
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

/// One half of the combined GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxLine {
    /// `CGST` or `SGST`
    pub label: &'static str,

    /// Amount, rounded to two places
    pub amount: Decimal,
}

/// Render `invoice` with `template`.
pub fn render(template: Template, invoice: &Invoice, profile: &StoreProfile) -> Document {
    let body = match template {
        Template::TaxInvoice => tax_invoice::render(invoice, profile),
        Template::ThermalReceipt => thermal::render(invoice, profile),
    };

    Document {
        template,
        title: format!("{} {}", template.title(), invoice.invoice_number),
        body,
    }
}

/// Split combined GST into its central and state halves.
///
/// Each half is rounded independently, so an odd paisa shows up on both
/// lines rather than being silently dropped from one.
pub fn tax_split(gst_amount: Decimal) -> SmallVec<[TaxLine; 2]> {
    let half = round_cents(gst_amount / Decimal::TWO);

    smallvec![
        TaxLine {
            label: "CGST",
            amount: half,
        },
        TaxLine {
            label: "SGST",
            amount: half,
        },
    ]
}

/// Format an amount with exactly two decimal places.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_cents(value))
}

/// Format an amount with the currency's symbol and separators.
pub fn format_money(value: Decimal, currency: &'static Currency) -> String {
    let rounded = value.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);

    Money::from_decimal(rounded, currency).to_string()
}

/// Invoice creation time on the store's clock.
pub fn local_timestamp(invoice: &Invoice, profile: &StoreProfile) -> String {
    invoice
        .created_at
        .to_zoned(profile.time_zone())
        .strftime(TIMESTAMP_FORMAT)
        .to_string()
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{invoices::InvoiceLine, payments::PaymentMode};

    use super::*;

    fn invoice() -> TestResult<Invoice> {
        Ok(Invoice {
            invoice_number: "INV-2026-000123".to_string(),
            created_at: "2026-10-18T09:30:00Z".parse::<Timestamp>()?,
            customer_name: Some("Asha".to_string()),
            customer_phone: "9876543210".to_string(),
            items: vec![InvoiceLine {
                product_id: None,
                name: "Rice".to_string(),
                price: Decimal::from(100),
                quantity: 2,
                total: Decimal::from(200),
            }],
            total_amount: Decimal::from(200),
            gst_amount: Decimal::from(10),
            discount_amount: Decimal::ZERO,
            net_amount: Decimal::from(210),
            payment_mode: PaymentMode::Cash,
        })
    }

    #[test]
    fn template_parses_from_slug() -> TestResult {
        assert_eq!("tax-invoice".parse::<Template>()?, Template::TaxInvoice);
        assert_eq!(" Thermal-Receipt ".parse::<Template>()?, Template::ThermalReceipt);
        assert_eq!(
            "a4".parse::<Template>(),
            Err(UnknownTemplate("a4".to_string()))
        );

        Ok(())
    }

    #[test]
    fn tax_split_halves_gst() {
        let lines = tax_split(Decimal::from(10));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines.first().map(|line| line.label), Some("CGST"));
        assert_eq!(lines.last().map(|line| line.label), Some("SGST"));
        assert!(lines.iter().all(|line| line.amount == Decimal::from(5)));
    }

    #[test]
    fn tax_split_rounds_each_half() {
        let lines = tax_split(Decimal::new(5, 2));

        assert!(lines.iter().all(|line| line.amount == Decimal::new(3, 2)));
    }

    #[test]
    fn amounts_have_two_places() {
        assert_eq!(format_amount(Decimal::from(200)), "200.00");
        assert_eq!(format_amount(Decimal::new(20505, 3)), "20.51");
        assert_eq!(format_amount(Decimal::new(5, 1)), "0.50");
    }

    #[test]
    fn money_carries_symbol() {
        assert!(format_money(Decimal::from(185), iso::INR).contains("185.00"));
        assert!(format_money(Decimal::from(185), iso::INR).contains('₹'));
    }

    #[test]
    fn timestamp_uses_store_clock() -> TestResult {
        assert_eq!(
            local_timestamp(&invoice()?, &StoreProfile::default()),
            "18-10-2026 15:00"
        );

        Ok(())
    }

    #[test]
    fn document_title_names_invoice() -> TestResult {
        let document = render(Template::TaxInvoice, &invoice()?, &StoreProfile::default());

        assert_eq!(document.title(), "Tax Invoice INV-2026-000123");
        assert_eq!(document.template(), Template::TaxInvoice);
        assert!(document.body().ends_with('\n'));

        Ok(())
    }
}
