//! Configuration module
//!
//! Pipeline settings read from environment variables with defaults. Call
//! [`PipelineConfig::from_env`] once at startup (after `dotenvy::dotenv()` if
//! a `.env` file is in use); pass the struct explicitly to the components
//! that need it.

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ANALYZER_TIMEOUT_SECS, DEFAULT_ARCHIVE_BATCH_SIZE, DEFAULT_DOWNLOAD_DELAY_MS,
    DEFAULT_UPLOAD_INCREMENT, DEFAULT_UPLOAD_TICK_MS,
};

/// Pipeline configuration
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Cadence of simulated upload progress ticks.
    pub upload_tick: Duration,
    /// Progress added per upload tick (progress runs 0..=100).
    pub upload_increment: u8,
    /// Timeout applied to external content-analysis calls.
    pub analyzer_timeout: Duration,
    /// Number of files added to an archive between cooperative yields.
    pub archive_batch_size: usize,
    /// Delay between sequential individual downloads.
    pub download_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            upload_tick: Duration::from_millis(DEFAULT_UPLOAD_TICK_MS),
            upload_increment: DEFAULT_UPLOAD_INCREMENT,
            analyzer_timeout: Duration::from_secs(DEFAULT_ANALYZER_TIMEOUT_SECS),
            archive_batch_size: DEFAULT_ARCHIVE_BATCH_SIZE,
            download_delay: Duration::from_millis(DEFAULT_DOWNLOAD_DELAY_MS),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        // Load a .env file when present; real environment wins.
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            upload_tick: Duration::from_millis(env_parse(
                "RENAMIX_UPLOAD_TICK_MS",
                defaults.upload_tick.as_millis() as u64,
            )),
            upload_increment: env_parse(
                "RENAMIX_UPLOAD_INCREMENT",
                defaults.upload_increment,
            ),
            analyzer_timeout: Duration::from_secs(env_parse(
                "RENAMIX_ANALYZER_TIMEOUT_SECS",
                defaults.analyzer_timeout.as_secs(),
            )),
            archive_batch_size: env_parse(
                "RENAMIX_ARCHIVE_BATCH_SIZE",
                defaults.archive_batch_size,
            ),
            download_delay: Duration::from_millis(env_parse(
                "RENAMIX_DOWNLOAD_DELAY_MS",
                defaults.download_delay.as_millis() as u64,
            )),
        }
    }

    /// Compact timings for tests, so simulated uploads settle in
    /// milliseconds instead of seconds.
    pub fn fast() -> Self {
        Self {
            upload_tick: Duration::from_millis(1),
            upload_increment: 50,
            analyzer_timeout: Duration::from_millis(50),
            archive_batch_size: 2,
            download_delay: Duration::from_millis(1),
        }
    }
}
