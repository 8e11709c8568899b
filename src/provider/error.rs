use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to build request URL from '{0}'")]
    InvalidUrl(String, #[source] url::ParseError),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}: {reason}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        reason: String,
    },

    #[error("Reading the response body failed for {0}")]
    BodyRead(String, #[source] std::io::Error),

    #[error("Giving up on {url} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<ProviderError>,
    },

    #[error("Failed to parse provider response")]
    JsonParse(#[from] serde_json::Error),

    #[error("Provider response has no hourly block")]
    MissingHourly,

    #[error("Provider response lacks requested variable '{0}'")]
    MissingVariable(String),

    #[error("Provider response timestamps are not evenly spaced: {previous} then {next}")]
    IrregularTime { previous: i64, next: i64 },

    #[error("Provider response timestamp {0} leaves the representable range")]
    TimestampOverflow(i64),

    #[error("Provider returned no location in its response")]
    EmptyResponse,

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to read cache file '{0}'")]
    CacheRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to write cache file '{0}'")]
    CacheWrite(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
