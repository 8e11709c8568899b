//! [`WeatherProvider`] backed by the Open-Meteo historical archive.

use crate::provider::client_config::ClientConfig;
use crate::provider::error::ProviderError;
use crate::provider::response_cache::ResponseCache;
use crate::provider::retry::{backoff_delay, is_retryable};
use crate::provider::{HourlyBlock, ProviderRequest, ProviderResponse, WeatherProvider};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::io;
use tokio::io::AsyncReadExt;
use tokio_util::io::StreamReader;
use url::Url;

/// Step assumed when the archive answers with a single timestamp.
const FALLBACK_INTERVAL_SECONDS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation: f64,
    #[serde(default)]
    utc_offset_seconds: i32,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    timezone_abbreviation: String,
    hourly: Option<HourlyPayload>,
}

#[derive(Debug, Deserialize)]
struct HourlyPayload {
    time: Vec<i64>,
    #[serde(flatten)]
    variables: HashMap<String, Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct ArchiveErrorBody {
    reason: String,
}

/// HTTP client for `archive-api.open-meteo.com`.
///
/// Successful bodies are kept in a [`ResponseCache`] under
/// [`ClientConfig::cache_dir`], so asking for the same location and period
/// twice only hits the network once (with the default never-expiring cache).
/// Transport failures and 500/502/504 answers are retried up to
/// [`ClientConfig::retries`] times with exponential backoff.
pub struct OpenMeteoClient {
    config: ClientConfig,
    cache: ResponseCache,
    download_client: Client,
}

impl OpenMeteoClient {
    pub fn new(config: ClientConfig) -> Self {
        let cache = ResponseCache::new(&config.cache_dir, config.expiry);
        Self {
            config,
            cache,
            download_client: Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the archive URL for `request`. Unix timestamps are requested so
    /// the response needs no timezone handling.
    pub fn request_url(&self, request: &ProviderRequest) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &self.config.base_url,
            &[
                ("latitude", request.latitude.to_string()),
                ("longitude", request.longitude.to_string()),
                ("start_date", request.start_date.format("%Y-%m-%d").to_string()),
                ("end_date", request.end_date.format("%Y-%m-%d").to_string()),
                ("hourly", request.hourly.join(",")),
                ("timeformat", "unixtime".to_string()),
            ],
        )
        .map_err(|e| ProviderError::InvalidUrl(self.config.base_url.clone(), e))
    }

    async fn get_with_retry(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let mut failures = 0u32;
        loop {
            match self.download(url).await {
                Ok(body) => return Ok(body),
                Err(e) if is_retryable(&e) => {
                    if failures >= self.config.retries {
                        return Err(ProviderError::RetriesExhausted {
                            url: url.to_string(),
                            attempts: failures + 1,
                            source: Box::new(e),
                        });
                    }
                    failures += 1;
                    let delay =
                        backoff_delay(self.config.backoff_factor, failures, self.config.backoff_max);
                    warn!(
                        "Attempt {} for {} failed: {}. Retrying in {:?}",
                        failures, url, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One GET, no retries.
    async fn download(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        info!("Downloading data from {}", url);
        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkRequest(url.to_string(), e))?;

        let status = response.status();
        if !status.is_success() {
            // The archive explains rejected parameters in a JSON body.
            let reason = response
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<ArchiveErrorBody>(&text).ok())
                .map(|body| body.reason)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            warn!("HTTP error for {}: {} {}", url, status, reason);
            return Err(ProviderError::HttpStatus {
                url: url.to_string(),
                status,
                reason,
            });
        }

        let stream = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        let mut reader = StreamReader::new(stream);
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .await
            .map_err(|e| ProviderError::BodyRead(url.to_string(), e))?;
        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn weather_api(
        &self,
        request: &ProviderRequest,
    ) -> Result<Vec<ProviderResponse>, ProviderError> {
        let url = self.request_url(request)?;
        if let Some(body) = self.cache.get(url.as_str()).await? {
            return Ok(vec![parse_archive_response(&body, &request.hourly)?]);
        }

        let body = self.get_with_retry(url.as_str()).await?;
        // Cache only bodies that decode.
        let response = parse_archive_response(&body, &request.hourly)?;
        self.cache.put(url.as_str(), &body).await?;
        Ok(vec![response])
    }
}

/// Decodes an archive JSON body into a [`ProviderResponse`].
///
/// Variables are arranged in the order of `fields`. The archive lists one
/// timestamp per observation, so the interval is the gap between the first two
/// and the block ends one interval after the last.
pub fn parse_archive_response(
    body: &[u8],
    fields: &[String],
) -> Result<ProviderResponse, ProviderError> {
    let archive: ArchiveResponse = serde_json::from_slice(body)?;
    let mut hourly = archive.hourly.ok_or(ProviderError::MissingHourly)?;

    let variables = fields
        .iter()
        .map(|field| {
            hourly
                .variables
                .remove(field)
                .ok_or_else(|| ProviderError::MissingVariable(field.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (time, time_end, interval) = time_bounds(&hourly.time)?;
    Ok(ProviderResponse {
        latitude: archive.latitude,
        longitude: archive.longitude,
        elevation: archive.elevation,
        timezone: archive.timezone,
        timezone_abbreviation: archive.timezone_abbreviation,
        utc_offset_seconds: archive.utc_offset_seconds,
        hourly: HourlyBlock {
            time,
            time_end,
            interval,
            variables,
        },
    })
}

/// Start, exclusive end and step of an evenly spaced list of stamps.
fn time_bounds(stamps: &[i64]) -> Result<(i64, i64, i64), ProviderError> {
    let (first, second) = match stamps {
        [] => return Ok((0, 0, FALLBACK_INTERVAL_SECONDS)),
        [only] => {
            let end = only
                .checked_add(FALLBACK_INTERVAL_SECONDS)
                .ok_or(ProviderError::TimestampOverflow(*only))?;
            return Ok((*only, end, FALLBACK_INTERVAL_SECONDS));
        }
        [first, second, ..] => (*first, *second),
    };

    let interval = match second.checked_sub(first) {
        Some(interval) if interval > 0 => interval,
        _ => {
            return Err(ProviderError::IrregularTime {
                previous: first,
                next: second,
            })
        }
    };

    let mut expected = first;
    for (previous, &stamp) in stamps.iter().zip(&stamps[1..]) {
        expected = expected
            .checked_add(interval)
            .ok_or(ProviderError::TimestampOverflow(*previous))?;
        if stamp != expected {
            return Err(ProviderError::IrregularTime {
                previous: *previous,
                next: stamp,
            });
        }
    }

    let end = expected
        .checked_add(interval)
        .ok_or(ProviderError::TimestampOverflow(expected))?;
    Ok((first, end, interval))
}
