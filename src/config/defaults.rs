//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default API base URL.
pub const BASE_URL: &str = crate::rest::DEFAULT_BASE_URL;

/// Default API version.
pub const API_VERSION: u32 = crate::rest::DEFAULT_API_VERSION;

/// Default per-attempt timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default maximum number of attempts.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry, in milliseconds.
pub const RETRY_BASE_DELAY_MS: u64 = 300;

/// Default cap on the backoff delay, in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 10_000;

/// Directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "abacatepay";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default per-attempt timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default base retry delay as Duration.
#[must_use]
pub const fn retry_base_delay() -> Duration {
    Duration::from_millis(RETRY_BASE_DELAY_MS)
}

/// Default maximum retry delay as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    Duration::from_millis(RETRY_MAX_DELAY_MS)
}
