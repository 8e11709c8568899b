//! The boundary between the crate and the remote weather archive.
//!
//! [`WeatherProvider`] is the seam the fetcher talks through. The production
//! implementation is [`open_meteo::OpenMeteoClient`], which layers an on-disk
//! response cache and a retry loop over a `reqwest` client. Tests substitute
//! their own implementation.

pub mod client_config;
pub mod error;
pub mod open_meteo;
pub mod response_cache;
pub mod retry;

use crate::provider::error::ProviderError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Parameters sent to the provider for a single location.
///
/// `hourly` is sent in order, and the provider answers positionally in that
/// same order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hourly: Vec<String>,
}

/// Columnar hourly block of a provider response.
///
/// Observations cover `[time, time_end)` in steps of `interval` seconds, all
/// as unix timestamps. `variables[i]` holds the values of the i-th requested
/// field.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyBlock {
    pub time: i64,
    pub time_end: i64,
    pub interval: i64,
    pub variables: Vec<Vec<Option<f64>>>,
}

/// Response for one location, as resolved by the provider.
///
/// The coordinates are those of the grid cell the provider picked, which can
/// differ slightly from the requested ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub timezone: String,
    pub timezone_abbreviation: String,
    pub utc_offset_seconds: i32,
    pub hourly: HourlyBlock,
}

/// A source of historical weather observations.
///
/// Implementations own their transport concerns (caching, retries) and only
/// return once they have a response or have given up.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches observations, one response per location in the request.
    async fn weather_api(
        &self,
        request: &ProviderRequest,
    ) -> Result<Vec<ProviderResponse>, ProviderError>;
}
