use std::{path::PathBuf, time::Duration};

use tracing::info;

use crate::cli::Cli;

/// Settings resolved from flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn load(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
            log_file: cli.log_file.clone(),
            log_level: cli.log_level.clone(),
        }
    }

    /// Record the effective settings once logging is up.
    pub fn log(&self) {
        info!(
            base_url = %self.base_url,
            timeout_secs = self.timeout.as_secs(),
            "configuration loaded"
        );
    }
}
