//! Bill scripts
//!
//! A YAML description of one sale, replayed against a billing session:
//!
//! ```yaml
//! customer:
//!   name: Asha
//!   phone: "9876543210"
//! discount:
//!   kind: percent
//!   value: 10
//! paymentMode: UPI
//! lines:
//!   - id: rice-5kg
//!     quantity: 2
//!   - search: sugar
//!     price: 45
//! ```
//!
//! The catalog only offers search, so an `id` line is resolved by searching
//! for the id and keeping the result whose id matches exactly. The backend's
//! search must therefore match on product ids as well as names.

use std::{fs, num::NonZeroU32, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use tally::{
    discounts::{Discount, DiscountType},
    payments::PaymentMode,
    products::ProductId,
};

use crate::errors::CliError;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct BillScript {
    #[serde(default)]
    pub customer: ScriptCustomer,

    #[serde(default)]
    pub discount: Option<ScriptDiscount>,

    #[serde(default)]
    pub payment_mode: PaymentMode,

    pub lines: Vec<ScriptLine>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScriptCustomer {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScriptDiscount {
    pub kind: DiscountType,

    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
}

impl From<&ScriptDiscount> for Discount {
    fn from(discount: &ScriptDiscount) -> Self {
        Discount::new(discount.kind, discount.value)
    }
}

/// Which product a line refers to.
#[derive(Debug, PartialEq)]
pub(crate) enum LineTarget<'a> {
    /// Exact catalog id, found through catalog search
    Id(&'a ProductId),

    /// First catalog hit for a search term
    Search(&'a str),
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScriptLine {
    #[serde(default)]
    pub id: Option<ProductId>,

    #[serde(default)]
    pub search: Option<String>,

    #[serde(default = "one")]
    pub quantity: NonZeroU32,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl ScriptLine {
    /// The product this line names. `line` is 1-based, for error messages.
    pub(crate) fn target(&self, line: usize) -> Result<LineTarget<'_>, CliError> {
        match (&self.id, self.search.as_deref().map(str::trim)) {
            (Some(id), None) => Ok(LineTarget::Id(id)),
            (None, Some(term)) if !term.is_empty() => Ok(LineTarget::Search(term)),
            (Some(_), Some(_)) => Err(CliError::ScriptLine {
                line,
                reason: "give either `id` or `search`, not both".to_string(),
            }),
            (None, _) => Err(CliError::ScriptLine {
                line,
                reason: "missing `id` or `search`".to_string(),
            }),
        }
    }
}

fn one() -> NonZeroU32 {
    NonZeroU32::MIN
}

impl BillScript {
    pub(crate) fn from_yaml_str(path: &Path, yaml: &str) -> Result<Self, CliError> {
        serde_norway::from_str(yaml).map_err(|source| CliError::ScriptYaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn from_yaml_file(path: &Path) -> Result<Self, CliError> {
        let yaml = fs::read_to_string(path).map_err(|source| CliError::ScriptIo {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(path, &yaml)
    }
}
