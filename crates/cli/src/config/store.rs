//! Store Profile Config

use std::path::PathBuf;

use clap::Args;
use tally::store::{StoreProfile, StoreProfileError};
use tracing::debug;

/// Store profile settings.
#[derive(Debug, Args)]
pub(crate) struct StoreArgs {
    /// YAML store profile printed on receipts
    #[arg(long, env = "TALLY_STORE_PROFILE", global = true)]
    pub store_profile: Option<PathBuf>,
}

impl StoreArgs {
    /// Load the configured profile, or the placeholder profile when none is set.
    pub(crate) fn load(&self) -> Result<StoreProfile, StoreProfileError> {
        let Some(path) = &self.store_profile else {
            debug!("no store profile configured; using placeholders");

            return Ok(StoreProfile::default());
        };

        debug!(path = %path.display(), "loading store profile");

        StoreProfile::from_yaml_file(path)
    }
}
