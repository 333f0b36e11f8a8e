//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tally::products::Product;
use tracing::debug;

use crate::http::{ApiClient, ApiError};

/// Catalog backed by `GET {api}/products?search=`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: ApiClient,
}

impl HttpCatalog {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogLookup for HttpCatalog {
    async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.client.get(&["products"], &[("search", query)]).await?;

        debug!(query, results = products.len(), "catalog search");

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Products whose name or code matches `query`, fresh from the catalog.
    async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError>;
}
