//! Shared constants.

/// Content type assigned to intake files that did not declare one.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Pattern synthesized when the configured template is empty or absent.
pub const DEFAULT_PATTERN_TEMPLATE: &str = "{type}_{date}_{counter}";

/// Default timeout for external content-analysis calls, in seconds.
pub const DEFAULT_ANALYZER_TIMEOUT_SECS: u64 = 10;

/// Default cadence of simulated upload progress ticks, in milliseconds.
pub const DEFAULT_UPLOAD_TICK_MS: u64 = 200;

/// Default progress added per upload tick.
pub const DEFAULT_UPLOAD_INCREMENT: u8 = 10;

/// Default number of files added to an archive between cooperative yields.
pub const DEFAULT_ARCHIVE_BATCH_SIZE: usize = 5;

/// Default delay between sequential individual downloads, in milliseconds.
pub const DEFAULT_DOWNLOAD_DELAY_MS: u64 = 100;
