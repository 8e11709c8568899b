//! This module provides the main entry point for fetching historical weather
//! observations. It validates query parameters, delegates the request to a
//! [`WeatherProvider`] and returns the reshaped [`ObservationTable`].

use crate::error::WeatherError;
use crate::provider::client_config::ClientConfig;
use crate::provider::open_meteo::OpenMeteoClient;
use crate::provider::WeatherProvider;
use crate::types::observation_table::ObservationTable;
use crate::types::query::{default_fields, Query};
use crate::utils::{ensure_dir_exists, get_cache_dir};
use crate::weather_data::fetcher::WeatherFetcher;
use crate::weather_data::observer::{FetchObserver, LogObserver};
use bon::bon;
use std::path::PathBuf;
use std::sync::Arc;

/// The main client struct for fetching historical weather data.
///
/// By default it talks to the Open-Meteo archive through an
/// [`OpenMeteoClient`] that caches every response on disk and retries
/// transient failures. Diagnostics go through a [`FetchObserver`], a
/// [`LogObserver`] unless another one is supplied.
///
/// Create an instance using [`HistoricalWeather::new()`] for the default cache
/// directory, [`HistoricalWeather::with_cache_folder()`] for a custom one, or
/// [`HistoricalWeather::with_provider()`] to plug in any provider.
///
/// # Examples
///
/// ```rust,no_run
/// # use meteo_archive::{HistoricalWeather, WeatherError};
/// # async fn run() -> Result<(), WeatherError> {
/// let client = HistoricalWeather::new().await?;
/// let table = client
///     .fetch()
///     .latitude(51.5)
///     .longitude(0.0)
///     .start_date("2024-01-01")
///     .end_date("2024-01-02")
///     .fields(vec!["snowfall".to_string()])
///     .call()
///     .await?;
/// println!("{} rows", table.len());
/// # Ok(())
/// # }
/// ```
pub struct HistoricalWeather {
    fetcher: WeatherFetcher,
}

#[bon]
impl HistoricalWeather {
    /// Creates a client backed by Open-Meteo with the given client settings.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::CacheDirCreation`] if the cache directory cannot be created.
    pub async fn with_config(config: ClientConfig) -> Result<Self, WeatherError> {
        ensure_dir_exists(&config.cache_dir)
            .await
            .map_err(|e| WeatherError::CacheDirCreation(config.cache_dir.clone(), e))?;
        Ok(Self::with_provider(
            Box::new(OpenMeteoClient::new(config)),
            Arc::new(LogObserver),
        ))
    }

    /// Creates a client caching responses in `cache_folder` with default retry settings.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::CacheDirCreation`] if the directory cannot be created.
    pub async fn with_cache_folder(cache_folder: impl Into<PathBuf>) -> Result<Self, WeatherError> {
        Self::with_config(ClientConfig::new(cache_folder)).await
    }

    /// Creates a client using the default cache directory
    /// (e.g. `~/.cache/meteo_archive_cache` on Linux).
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::CacheDirResolution`] if no cache directory is known for this platform.
    /// Returns [`WeatherError::CacheDirCreation`] if it cannot be created.
    pub async fn new() -> Result<Self, WeatherError> {
        let cache_folder = get_cache_dir().map_err(WeatherError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Creates a client around an arbitrary provider and observer.
    pub fn with_provider(
        provider: Box<dyn WeatherProvider>,
        observer: Arc<dyn FetchObserver>,
    ) -> Self {
        Self {
            fetcher: WeatherFetcher::new(provider, observer),
        }
    }

    /// Fetches hourly observations for one location and date range.
    ///
    /// Parameters are validated before anything is sent, then exactly one
    /// provider request is made.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.latitude(f64)`: **Required.** Within -90 to 90.
    /// * `.longitude(f64)`: **Required.** Within 0 to 180.
    /// * `.start_date(&str)`: **Required.** `YYYY-MM-DD`.
    /// * `.end_date(&str)`: **Required.** `YYYY-MM-DD`, not before `start_date`.
    /// * `.fields(Vec<String>)`: Optional. Hourly variables in the desired column order.
    ///   Defaults to `snowfall`, `wind_speed_10m`, `wind_gusts_10m`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::InvalidParameters`] for rejected inputs,
    /// [`WeatherError::Provider`] when the request fails (after retries), and
    /// [`WeatherError::Reshape`] when the response is inconsistent.
    #[builder]
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        start_date: &str,
        end_date: &str,
        fields: Option<Vec<String>>,
    ) -> Result<ObservationTable, WeatherError> {
        let query = Query::new(
            latitude,
            longitude,
            start_date,
            end_date,
            fields.unwrap_or_else(default_fields),
        )?;
        self.fetch_query(&query).await
    }

    /// Fetches observations for an already validated [`Query`].
    pub async fn fetch_query(&self, query: &Query) -> Result<ObservationTable, WeatherError> {
        self.fetcher.fetch(query).await
    }
}
