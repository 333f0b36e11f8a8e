//! Billing API Config

use std::{sync::Arc, time::Duration};

use clap::Args;
use tally_app::{
    http::ApiConfig,
    session::{Session, StaticSession},
};

/// Billing API connection settings.
#[derive(Debug, Args)]
pub(crate) struct ApiArgs {
    /// Billing API root URL
    #[arg(long, env = "TALLY_API_URL", default_value = ApiConfig::DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Bearer token for the billing API
    #[arg(long, env = "TALLY_API_TOKEN", hide_env_values = true, hide = true, global = true)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "TALLY_API_TIMEOUT_SECONDS", default_value_t = 30_u64, global = true)]
    pub api_timeout_seconds: u64,
}

impl ApiArgs {
    pub(crate) fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.api_timeout_seconds),
        }
    }

    pub(crate) fn session(&self) -> Arc<dyn Session> {
        StaticSession::shared(self.api_token.clone())
    }
}
