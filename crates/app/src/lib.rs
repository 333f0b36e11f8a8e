//! Tally application services.
//!
//! Async plumbing around the pure billing engine: the HTTP client for the
//! billing backend, catalog lookup, the invoice ledger, checkout with its
//! busy flag, billing sessions and receipt printing.

pub mod billing;
pub mod catalog;
pub mod checkout;
pub mod context;
pub mod http;
pub mod ledger;
pub mod printing;
pub mod session;
