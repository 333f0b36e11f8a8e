//! App Context

use std::sync::Arc;

use tally::store::StoreProfile;
use thiserror::Error;

use crate::{
    billing::BillingSession,
    catalog::{CatalogLookup, HttpCatalog},
    checkout::CheckoutService,
    http::{ApiClient, ApiConfig, ApiError},
    ledger::{HttpLedger, Ledger},
    session::Session,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build http client")]
    Http(#[source] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogLookup>,
    pub ledger: Arc<dyn Ledger>,
    pub checkout: Arc<CheckoutService>,
    pub store: StoreProfile,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("checkout", &self.checkout)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context against the billing API.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(
        config: ApiConfig,
        session: Arc<dyn Session>,
        store: StoreProfile,
    ) -> Result<Self, AppInitError> {
        let client = ApiClient::new(config, session).map_err(AppInitError::Http)?;
        let ledger: Arc<dyn Ledger> = Arc::new(HttpLedger::new(client.clone()));

        Ok(Self {
            catalog: Arc::new(HttpCatalog::new(client)),
            checkout: Arc::new(CheckoutService::new(Arc::clone(&ledger))),
            ledger,
            store,
        })
    }

    /// Fresh billing session sharing this context's services.
    ///
    /// Every session shares one [`CheckoutService`], so only one checkout is
    /// in flight at a time across them.
    #[must_use]
    pub fn billing_session(&self) -> BillingSession {
        BillingSession::new(Arc::clone(&self.catalog), Arc::clone(&self.checkout))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::session::StaticSession;

    use super::*;

    #[test]
    fn builds_from_default_config() -> TestResult {
        let context = AppContext::from_config(
            ApiConfig::default(),
            StaticSession::shared(None),
            StoreProfile::default(),
        )?;

        let billing = context.billing_session();

        assert!(billing.cart().is_empty());
        assert!(!context.checkout.is_busy());

        Ok(())
    }
}
