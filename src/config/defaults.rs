//! Default values for configuration options.

use std::time::Duration;

use crate::transport::RetryPolicy;
use crate::validate::MIB;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 10;

/// Default upper bound on imported documents.
pub const MAX_IMPORT_SIZE: u64 = MIB;

/// Default maximum number of attempts for reads.
pub const RETRY_MAX_ATTEMPTS: u32 = RetryPolicy::DEFAULT_MAX_ATTEMPTS;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = RetryPolicy::DEFAULT_MULTIPLIER;

/// File name used by `init` when no output is given.
pub const CONFIG_FILE_NAME: &str = "confsync.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default initial retry delay as Duration.
#[must_use]
pub const fn retry_initial_delay() -> Duration {
    RetryPolicy::DEFAULT_INITIAL_DELAY
}

/// Default maximum retry delay as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    RetryPolicy::DEFAULT_MAX_DELAY
}

/// Settings file read when `--config` is not given:
/// `<config dir>/confsync/config.toml`.
#[must_use]
pub fn config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|dir| dir.join("confsync").join("config.toml"))
}
