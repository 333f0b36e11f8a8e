//! Printing
//!
//! Receipts are rendered by the core crate and handed to a [`PrintSurface`].
//! A surface failure never touches cart or invoice state: the invoice stays
//! valid and can be reprinted from history.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use mockall::automock;
use tally::{
    invoices::Invoice,
    receipt::{Document, Template, render},
    store::StoreProfile,
};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while printing a rendered receipt.
#[derive(Debug, Error)]
pub enum PrintError {
    /// The surface could not be opened (printer offline, spool missing).
    #[error("print surface {surface} is unavailable")]
    SurfaceUnavailable {
        /// Human readable surface name
        surface: String,

        /// Underlying cause
        #[source]
        source: io::Error,
    },

    /// The surface accepted the job but writing failed.
    #[error("failed to write receipt: {0}")]
    Write(#[from] io::Error),
}

/// Somewhere a rendered document can be sent.
#[automock]
pub trait PrintSurface: Send + Sync {
    /// Emit one document. `invoice_number` identifies the job.
    ///
    /// # Errors
    ///
    /// Returns a [`PrintError`] if the document could not be emitted.
    fn print(&self, invoice_number: &str, document: &Document) -> Result<(), PrintError>;
}

/// Writes each receipt to `<dir>/<invoice>-<template>.txt`.
#[derive(Debug, Clone)]
pub struct SpoolDirectory {
    dir: PathBuf,
}

impl SpoolDirectory {
    /// Spool into `dir`, which must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Spool directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a document for `invoice_number` is written to.
    pub fn path_for(&self, invoice_number: &str, template: Template) -> PathBuf {
        let stem: String = invoice_number
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();

        self.dir.join(format!("{stem}-{}.txt", template.slug()))
    }
}

impl PrintSurface for SpoolDirectory {
    fn print(&self, invoice_number: &str, document: &Document) -> Result<(), PrintError> {
        if !self.dir.is_dir() {
            return Err(PrintError::SurfaceUnavailable {
                surface: self.dir.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "spool directory does not exist"),
            });
        }

        let path = self.path_for(invoice_number, document.template());

        fs::write(&path, document.body())?;

        info!(path = %path.display(), "receipt spooled");

        Ok(())
    }
}

/// Renders invoices with a fixed template and profile and sends them to a surface.
#[derive(Clone)]
pub struct ReceiptPrinter {
    surface: Arc<dyn PrintSurface>,
    template: Template,
    profile: StoreProfile,
}

impl fmt::Debug for ReceiptPrinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptPrinter")
            .field("template", &self.template)
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl ReceiptPrinter {
    #[must_use]
    pub fn new(surface: Arc<dyn PrintSurface>, template: Template, profile: StoreProfile) -> Self {
        Self {
            surface,
            template,
            profile,
        }
    }

    /// Template used for every job.
    pub fn template(&self) -> Template {
        self.template
    }

    /// Render and print `invoice`.
    ///
    /// # Errors
    ///
    /// Returns the surface's [`PrintError`]. Callers log it and carry on.
    pub fn print(&self, invoice: &Invoice) -> Result<Document, PrintError> {
        print_receipt(self.surface.as_ref(), self.template, invoice, &self.profile)
    }

    /// Print `invoice`, logging rather than returning any failure.
    pub fn print_or_warn(&self, invoice: &Invoice) -> Option<Document> {
        match self.print(invoice) {
            Ok(document) => Some(document),
            Err(error) => {
                warn!(
                    invoice = %invoice.invoice_number,
                    %error,
                    "receipt not printed; reprint it from history"
                );

                None
            }
        }
    }
}

/// Render `invoice` with `template` and send it to `surface`.
///
/// # Errors
///
/// Returns the surface's [`PrintError`].
pub fn print_receipt(
    surface: &dyn PrintSurface,
    template: Template,
    invoice: &Invoice,
    profile: &StoreProfile,
) -> Result<Document, PrintError> {
    let document = render(template, invoice, profile);

    surface.print(&invoice.invoice_number, &document)?;

    Ok(document)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use tally::payments::PaymentMode;
    use testresult::TestResult;

    use super::*;

    fn invoice() -> Invoice {
        Invoice {
            invoice_number: "INV-2026-000009".to_string(),
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
    fn spools_rendered_document() -> TestResult {
        let dir = tempfile::tempdir()?;
        let spool = SpoolDirectory::new(dir.path());

        let document = print_receipt(
            &spool,
            Template::ThermalReceipt,
            &invoice(),
            &StoreProfile::default(),
        )?;

        let written = fs::read_to_string(dir.path().join("INV-2026-000009-thermal-receipt.txt"))?;

        assert_eq!(written, document.body());

        Ok(())
    }

    #[test]
    fn missing_spool_is_unavailable() -> TestResult {
        let dir = tempfile::tempdir()?;
        let spool = SpoolDirectory::new(dir.path().join("offline"));

        let result = print_receipt(
            &spool,
            Template::TaxInvoice,
            &invoice(),
            &StoreProfile::default(),
        );

        assert!(matches!(result, Err(PrintError::SurfaceUnavailable { .. })));

        Ok(())
    }

    #[test]
    fn file_names_are_sanitised() {
        let spool = SpoolDirectory::new("/spool");

        assert_eq!(
            spool.path_for("INV/2026 01", Template::TaxInvoice),
            PathBuf::from("/spool/INV_2026_01-tax-invoice.txt")
        );
    }

    #[test]
    fn print_or_warn_swallows_failures() {
        let mut surface = MockPrintSurface::new();

        surface.expect_print().once().returning(|_, _| {
            Err(PrintError::SurfaceUnavailable {
                surface: "thermal".to_string(),
                source: io::Error::other("paper out"),
            })
        });

        let printer = ReceiptPrinter::new(
            Arc::new(surface),
            Template::ThermalReceipt,
            StoreProfile::default(),
        );

        assert!(printer.print_or_warn(&invoice()).is_none());
    }

    #[test]
    fn printer_uses_configured_template() -> TestResult {
        let mut surface = MockPrintSurface::new();

        surface
            .expect_print()
            .once()
            .withf(|number, document| {
                number == "INV-2026-000009" && document.template() == Template::TaxInvoice
            })
            .returning(|_, _| Ok(()));

        let printer = ReceiptPrinter::new(
            Arc::new(surface),
            Template::TaxInvoice,
            StoreProfile::default(),
        );

        let document = printer.print(&invoice())?;

        assert!(document.body().contains("TAX INVOICE"));

        Ok(())
    }
}
