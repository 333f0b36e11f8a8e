//! Store profile
//!
//! Letterhead details printed on receipts. Every field is optional; missing or
//! blank values fall back to the placeholders below so rendering never fails.

use std::{fs, path::Path};

use jiff::tz::{Offset, TimeZone};
use rusty_money::iso::{self, Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder business name.
pub const DEFAULT_BUSINESS_NAME: &str = "Retail Store";

/// Placeholder address.
pub const DEFAULT_ADDRESS: &str = "Address not configured";

/// Placeholder phone.
pub const DEFAULT_PHONE: &str = "N/A";

/// Placeholder tax registration id.
pub const DEFAULT_TAX_ID: &str = "N/A";

/// Currency used when none (or an unknown one) is configured.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Receipt clock offset used when none is configured (UTC+05:30).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Errors loading a store profile from disk.
#[derive(Debug, Error)]
pub enum StoreProfileError {
    /// IO error reading the profile
    #[error("failed to read store profile: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse store profile: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Store profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreProfile {
    /// Trading name
    pub business_name: Option<String>,

    /// Postal address
    pub address: Option<String>,

    /// Contact phone
    pub phone: Option<String>,

    /// Tax registration id (GSTIN)
    pub tax_id: Option<String>,

    /// ISO 4217 currency code
    pub currency: Option<String>,

    /// Offset from UTC, in minutes, for printed timestamps
    pub utc_offset_minutes: Option<i32>,
}

impl StoreProfile {
    /// Load a profile from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, StoreProfileError> {
        let contents = fs::read_to_string(path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Business name or [`DEFAULT_BUSINESS_NAME`].
    pub fn business_name(&self) -> &str {
        or_default(self.business_name.as_deref(), DEFAULT_BUSINESS_NAME)
    }

    /// Address or [`DEFAULT_ADDRESS`].
    pub fn address(&self) -> &str {
        or_default(self.address.as_deref(), DEFAULT_ADDRESS)
    }

    /// Phone or [`DEFAULT_PHONE`].
    pub fn phone(&self) -> &str {
        or_default(self.phone.as_deref(), DEFAULT_PHONE)
    }

    /// Tax id or [`DEFAULT_TAX_ID`].
    pub fn tax_id(&self) -> &str {
        or_default(self.tax_id.as_deref(), DEFAULT_TAX_ID)
    }

    /// Configured currency, falling back to [`DEFAULT_CURRENCY`] for absent or unknown codes.
    pub fn currency(&self) -> &'static Currency {
        self.currency
            .as_deref()
            .map(str::trim)
            .and_then(iso::find)
            .unwrap_or(iso::INR)
    }

    /// Time zone for printed timestamps.
    pub fn time_zone(&self) -> TimeZone {
        let minutes = self
            .utc_offset_minutes
            .unwrap_or(DEFAULT_UTC_OFFSET_MINUTES);

        minutes
            .checked_mul(60)
            .and_then(|seconds| Offset::from_seconds(seconds).ok())
            .unwrap_or(Offset::UTC)
            .to_time_zone()
    }
}

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}
