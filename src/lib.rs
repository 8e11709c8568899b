//! Historical hourly weather observations from the Open-Meteo archive.
//!
//! The crate validates a query (coordinates, ISO date range, ordered field
//! list), performs a single cached and retried request against the archive,
//! and reshapes the columnar answer into an [`ObservationTable`] that can be
//! turned into a Polars `DataFrame` or written to CSV.

mod error;
mod export;
mod historical_weather;
mod provider;
mod types;
mod utils;
mod validation;
mod weather_data;

pub use error::WeatherError;
pub use historical_weather::*;

pub use types::observation_table::{ObservationRow, ObservationTable, DATE_COLUMN};
pub use types::query::{default_fields, LatLon, Query, DEFAULT_FIELDS};

pub use validation::error::InvalidParameters;
pub use validation::validator::{validate_fields, validate_parameters};

pub use provider::client_config::{CacheExpiry, ClientConfig, ARCHIVE_URL};
pub use provider::error::ProviderError;
pub use provider::open_meteo::{parse_archive_response, OpenMeteoClient};
pub use provider::{HourlyBlock, ProviderRequest, ProviderResponse, WeatherProvider};

pub use weather_data::error::ReshapeError;
pub use weather_data::fetcher::WeatherFetcher;
pub use weather_data::observer::{FetchEvent, FetchObserver, LogObserver, RecordingObserver};
pub use weather_data::reshape::{reshape, time_range};

pub use export::config::{ExportConfig, Location};
pub use export::csv_export::{csv_file_name, csv_path, write_csv};
pub use export::error::ExportError;
pub use export::runner::export_locations;
