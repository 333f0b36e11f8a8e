//! Catalog lookup

mod service;

pub use service::*;
