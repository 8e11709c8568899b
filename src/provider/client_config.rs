//! Construction parameters for [`crate::OpenMeteoClient`].

use bon::Builder;
use std::path::PathBuf;
use std::time::Duration;

/// Historical archive endpoint of Open-Meteo.
pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

pub const DEFAULT_RETRIES: u32 = 5;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 0.2;
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(120);

/// How long a cached response stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheExpiry {
    /// Cached responses are reused forever. Archive data for past dates does
    /// not change, so this is the default.
    Never,
    /// Entries older than the given age are refetched.
    After(Duration),
}

/// Cache and retry settings for the archive client.
///
/// # Examples
///
/// ```
/// use meteo_archive::{CacheExpiry, ClientConfig};
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .cache_dir(".cache")
///     .expiry(CacheExpiry::After(Duration::from_secs(3600)))
///     .retries(3)
///     .build();
/// assert_eq!(config.retries, 3);
/// assert_eq!(config.backoff_factor, 0.2);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClientConfig {
    /// Directory holding cached response bodies, created on first write.
    #[builder(into)]
    pub cache_dir: PathBuf,

    #[builder(default = CacheExpiry::Never)]
    pub expiry: CacheExpiry,

    /// Retries after the first attempt.
    #[builder(default = DEFAULT_RETRIES)]
    pub retries: u32,

    /// Seconds, doubled for every consecutive failure.
    #[builder(default = DEFAULT_BACKOFF_FACTOR)]
    pub backoff_factor: f64,

    #[builder(default = DEFAULT_BACKOFF_MAX)]
    pub backoff_max: Duration,

    #[builder(default = ARCHIVE_URL.to_string(), into)]
    pub base_url: String,
}

impl ClientConfig {
    /// Default settings with the given cache directory.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self::builder().cache_dir(cache_dir).build()
    }
}
