//! CLI errors.

use std::{io, path::PathBuf};

use tally::store::StoreProfileError;
use tally_app::{
    checkout::CheckoutError, context::AppInitError, http::ApiError, printing::PrintError,
};
use thiserror::Error;

use crate::observability::ObservabilityError;

/// Why a command failed.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error("failed to load store profile: {0}")]
    StoreProfile(#[from] StoreProfileError),

    #[error(transparent)]
    Init(#[from] AppInitError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Print(#[from] PrintError),

    #[error("failed to read bill script {path}: {source}")]
    ScriptIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse bill script {path}: {source}")]
    ScriptYaml {
        path: PathBuf,
        #[source]
        source: serde_norway::Error,
    },

    #[error("bill line {line}: {reason}")]
    ScriptLine { line: usize, reason: String },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Message shown to the cashier before exiting.
    pub(crate) fn user_message(&self) -> String {
        match self {
            CliError::Api(error) => error.user_message(),
            CliError::Checkout(error) => error.user_message(),
            error => error.to_string(),
        }
    }
}
