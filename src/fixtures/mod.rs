//! Fixtures
//!
//! YAML catalogs, store profiles and invoices for tests and demos. Files live
//! under `<base>/products`, `<base>/stores` and `<base>/invoices`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::Cart,
    invoices::Invoice,
    products::Product,
    store::StoreProfile,
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Same product id defined twice
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),
}

#[derive(Debug, Deserialize)]
struct ProductsFixture {
    products: Vec<Product>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Loaded catalog, in file order
    products: Vec<Product>,

    /// Loaded store profile
    store: Option<StoreProfile>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            store: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a product
    /// id is already loaded.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = read_yaml(&self.file("products", name))?;

        for product in fixture.products {
            if self.products.iter().any(|loaded| loaded.id == product.id) {
                return Err(FixtureError::DuplicateProduct(product.id.to_string()));
            }

            self.products.push(product);
        }

        Ok(self)
    }

    /// Load a store profile from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_store(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.store = Some(read_yaml(&self.file("stores", name))?);

        Ok(self)
    }

    /// Read an invoice fixture
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn invoice(&self, name: &str) -> Result<Invoice, FixtureError> {
        read_yaml(&self.file("invoices", name))
    }

    /// Look up a loaded product by id
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if no such product is loaded.
    pub fn product(&self, id: &str) -> Result<&Product, FixtureError> {
        self.products
            .iter()
            .find(|product| product.id.as_str() == id)
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_string()))
    }

    /// All loaded products
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Loaded store profile, or the placeholder profile if none was loaded
    pub fn store(&self) -> StoreProfile {
        self.store.clone().unwrap_or_default()
    }

    /// Build a cart by adding each product id in order.
    ///
    /// Repeating an id increments that line's quantity, as at the counter.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if an id is not loaded.
    pub fn cart(&self, ids: &[&str]) -> Result<Cart, FixtureError> {
        let mut cart = Cart::new();

        for id in ids {
            cart = cart.add(self.product(id)?);
        }

        Ok(cart)
    }

    fn file(&self, kind: &str, name: &str) -> PathBuf {
        self.base_path.join(kind).join(format!("{name}.yml"))
    }
}

fn read_yaml<T>(path: &Path) -> Result<T, FixtureError>
where
    T: for<'de> Deserialize<'de>,
{
    let contents = fs::read_to_string(path)?;

    Ok(serde_norway::from_str(&contents)?)
}
