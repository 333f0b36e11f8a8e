//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque product identifier assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Product as returned by the catalog. Read-only to the billing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    #[serde(alias = "_id")]
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Price of a single unit
    #[serde(alias = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Tax rate in percent points (0-100)
    #[serde(default, alias = "gst", with = "rust_decimal::serde::float")]
    pub tax_percent: Decimal,

    /// Units in stock
    #[serde(default)]
    pub stock: i64,

    /// Unit label, e.g. `kg`
    #[serde(default)]
    pub unit: Option<String>,
}

impl Product {
    /// Unit label for display, `pcs` when the catalog has none.
    pub fn unit_label(&self) -> &str {
        self.unit
            .as_deref()
            .filter(|unit| !unit.trim().is_empty())
            .unwrap_or("pcs")
    }

    /// Whether the catalog reports any stock for this product.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserializes_catalog_aliases() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{"_id":"p-1","name":"Rice 5kg","price":100,"gst":5,"stock":12,"unit":"bag"}"#,
        )?;

        assert_eq!(product.id, ProductId::from("p-1"));
        assert_eq!(product.unit_price, Decimal::from(100));
        assert_eq!(product.tax_percent, Decimal::from(5));
        assert_eq!(product.stock, 12);
        assert_eq!(product.unit_label(), "bag");

        Ok(())
    }

    #[test]
    fn missing_optional_fields_use_defaults() -> TestResult {
        let product: Product =
            serde_json::from_str(r#"{"id":"p-2","name":"Soap","unitPrice":35.5}"#)?;

        assert_eq!(product.unit_price, Decimal::new(355, 1));
        assert_eq!(product.tax_percent, Decimal::ZERO);
        assert_eq!(product.unit_label(), "pcs");
        assert!(!product.in_stock());

        Ok(())
    }
}
