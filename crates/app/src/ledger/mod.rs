//! Ledger
//!
//! The remote system of record for invoices.

mod service;

pub use service::*;
