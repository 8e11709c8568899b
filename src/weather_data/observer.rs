//! Diagnostics emitted while fetching, delivered to an injected observer
//! instead of a process-wide logger.

use chrono::NaiveDate;
use log::info;
use std::sync::Mutex;

/// Something worth reporting during a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// The request is about to be handed to the provider.
    RequestIssued {
        latitude: f64,
        longitude: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        fields: Vec<String>,
    },
    /// The provider answered and resolved the location to a grid cell.
    LocationResolved {
        latitude: f64,
        longitude: f64,
        elevation: f64,
        timezone: String,
        timezone_abbreviation: String,
        utc_offset_seconds: i32,
    },
    /// The response was reshaped into a table.
    TableAssembled { rows: usize, fields: usize },
}

/// Receives [`FetchEvent`]s from a [`crate::WeatherFetcher`].
pub trait FetchObserver: Send + Sync {
    fn on_event(&self, event: &FetchEvent);
}

/// Forwards every event to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl FetchObserver for LogObserver {
    fn on_event(&self, event: &FetchEvent) {
        match event {
            FetchEvent::RequestIssued {
                latitude,
                longitude,
                start_date,
                end_date,
                fields,
            } => {
                info!(
                    "Calling the Open-Meteo API for ({}, {}) from {} to {} with fields {:?}",
                    latitude, longitude, start_date, end_date, fields
                );
            }
            FetchEvent::LocationResolved {
                latitude,
                longitude,
                elevation,
                timezone,
                timezone_abbreviation,
                utc_offset_seconds,
            } => {
                info!("Coordinates {}°N {}°E", latitude, longitude);
                info!("Elevation {} m asl", elevation);
                info!("Timezone {} {}", timezone, timezone_abbreviation);
                info!("Timezone difference to GMT+0 {} s", utc_offset_seconds);
            }
            FetchEvent::TableAssembled { rows, fields } => {
                info!("Assembled {} rows for {} fields", rows, fields);
            }
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<FetchEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<FetchEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl FetchObserver for RecordingObserver {
    fn on_event(&self, event: &FetchEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
