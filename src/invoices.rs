//! Invoices
//!
//! An invoice is the ledger's persisted record of a completed checkout. The
//! client never edits one.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    checkout::{CheckoutItem, CheckoutRequest},
    payments::PaymentMode,
    products::ProductId,
};

/// Line snapshot stored on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    /// Product identifier, when the ledger echoes it back
    #[serde(default)]
    pub product_id: Option<ProductId>,

    /// Product name at checkout time
    pub name: String,

    /// Unit price charged
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Quantity sold
    pub quantity: u32,

    /// Line total
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<CheckoutItem> for InvoiceLine {
    fn from(item: CheckoutItem) -> Self {
        Self {
            product_id: Some(item.product_id),
            name: item.name,
            price: item.price,
            quantity: item.quantity,
            total: item.total,
        }
    }
}

/// Invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Server-generated invoice number, e.g. `INV-2026-000123`
    pub invoice_number: String,

    /// Server-generated creation time
    pub created_at: Timestamp,

    /// Customer name, if entered
    #[serde(default)]
    pub customer_name: Option<String>,

    /// Customer phone
    pub customer_phone: String,

    /// Line snapshot
    pub items: Vec<InvoiceLine>,

    /// Subtotal before tax
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    /// Combined tax
    #[serde(with = "rust_decimal::serde::float")]
    pub gst_amount: Decimal,

    /// Discount taken off
    #[serde(default, with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,

    /// Amount paid
    #[serde(with = "rust_decimal::serde::float")]
    pub net_amount: Decimal,

    /// Payment mode
    #[serde(default)]
    pub payment_mode: PaymentMode,
}

impl Invoice {
    /// Build the invoice a ledger issues for `request`.
    pub fn issue(
        request: CheckoutRequest,
        invoice_number: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            invoice_number: invoice_number.into(),
            created_at,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            items: request.items.into_iter().map(InvoiceLine::from).collect(),
            total_amount: request.total_amount,
            gst_amount: request.gst_amount,
            discount_amount: request.discount_amount,
            net_amount: request.net_amount,
            payment_mode: request.payment_mode,
        }
    }

    /// Display form of the invoice number: the segment after the last `-`.
    pub fn short_number(&self) -> &str {
        self.invoice_number
            .rsplit('-')
            .next()
            .filter(|suffix| !suffix.is_empty())
            .unwrap_or(&self.invoice_number)
    }

    /// Whether a discount was applied.
    pub fn has_discount(&self) -> bool {
        self.discount_amount > Decimal::ZERO
    }

    /// Total number of units sold.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn invoice(number: &str) -> Invoice {
        Invoice {
            invoice_number: number.to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            customer_name: None,
            customer_phone: "9876543210".to_string(),
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            gst_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            net_amount: Decimal::ZERO,
            payment_mode: PaymentMode::Cash,
        }
    }

    #[test]
    fn short_number_takes_last_dash_segment() {
        assert_eq!(invoice("INV-2026-000123").short_number(), "000123");
        assert_eq!(invoice("000777").short_number(), "000777");
        assert_eq!(invoice("INV-").short_number(), "INV-");
    }

    #[test]
    fn deserializes_ledger_response() -> TestResult {
        let invoice: Invoice = serde_json::from_str(
            r#"{
                "_id": "66f0",
                "invoiceNumber": "INV-1729-0042",
                "createdAt": "2026-10-18T09:30:00.000Z",
                "customerName": "Asha",
                "customerPhone": "9876543210",
                "items": [
                    {"productId": "rice", "name": "Rice", "price": 100, "quantity": 2, "total": 200}
                ],
                "totalAmount": 200,
                "gstAmount": 10,
                "netAmount": 210,
                "paymentMode": "UPI"
            }"#,
        )?;

        assert_eq!(invoice.short_number(), "0042");
        assert_eq!(invoice.created_at, "2026-10-18T09:30:00Z".parse::<Timestamp>()?);
        assert_eq!(invoice.discount_amount, Decimal::ZERO);
        assert!(!invoice.has_discount());
        assert_eq!(invoice.payment_mode, PaymentMode::Upi);
        assert_eq!(invoice.item_count(), 2);

        Ok(())
    }
}
