//! CLI configuration module

use clap::Parser;

use crate::{
    commands::Command,
    config::{api::ApiArgs, observability::LoggingConfig, store::StoreArgs},
};

pub(crate) mod api;
pub(crate) mod observability;
pub(crate) mod store;

/// Tally point-of-sale billing
#[derive(Debug, Parser)]
#[command(name = "tally", about = "Tally point-of-sale billing", long_about = None)]
pub(crate) struct TallyConfig {
    /// Billing API settings.
    #[command(flatten)]
    pub api: ApiArgs,

    /// Store profile settings.
    #[command(flatten)]
    pub store: StoreArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl TallyConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
