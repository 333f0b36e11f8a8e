//! Tally point-of-sale billing CLI

use std::process;

use tally_app::context::AppContext;
use tracing::debug;

use crate::{config::TallyConfig, errors::CliError};

mod commands;
mod config;
mod errors;
mod observability;
mod script;

/// Tally CLI entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = TallyConfig::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = run(config).await {
        #[expect(
            clippy::print_stderr,
            reason = "errors are reported to the cashier, not only to the log"
        )]
        {
            eprintln!("error: {}", error.user_message());
        }

        process::exit(1);
    }
}

async fn run(config: TallyConfig) -> Result<(), CliError> {
    observability::init_subscriber(&config.logging)?;

    let store = config.store.load()?;

    debug!(api = %config.api.api_url, "starting");

    let context = AppContext::from_config(config.api.api_config(), config.api.session(), store)?;

    commands::run(config.command, &context).await
}
