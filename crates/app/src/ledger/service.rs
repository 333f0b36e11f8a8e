//! Ledger service.

use async_trait::async_trait;
use mockall::automock;
use tally::{checkout::CheckoutRequest, invoices::Invoice};
use tracing::info;

use crate::http::{ApiClient, ApiError};

/// Ledger backed by the `{api}/invoices` resource.
#[derive(Debug, Clone)]
pub struct HttpLedger {
    client: ApiClient,
}

impl HttpLedger {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Ledger for HttpLedger {
    async fn submit(&self, request: &CheckoutRequest) -> Result<Invoice, ApiError> {
        let invoice: Invoice = self.client.post(&["invoices"], request).await?;

        info!(invoice = %invoice.invoice_number, "invoice created");

        Ok(invoice)
    }

    async fn invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        self.client.get(&["invoices"], &[]).await
    }

    async fn invoice(&self, invoice_number: &str) -> Result<Invoice, ApiError> {
        self.client.get(&["invoices", invoice_number], &[]).await
    }
}

#[automock]
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Persist a checkout, returning the server-issued invoice.
    async fn submit(&self, request: &CheckoutRequest) -> Result<Invoice, ApiError>;

    /// Invoice history, as ordered by the server.
    async fn invoices(&self) -> Result<Vec<Invoice>, ApiError>;

    /// A single invoice. [`ApiError::NotFound`] once it has been deleted.
    async fn invoice(&self, invoice_number: &str) -> Result<Invoice, ApiError>;
}
