//! YAML configuration of a batch export run.
//!
//! ```yaml
//! export_parent_path: data/historical_weather
//! start_date: 2023-01-01
//! end_date: 2023-12-31
//! selected_airports:
//!   EHAM:
//!     latitude: 52.3086
//!     longitude: 4.7639
//! ```

use crate::export::error::ExportError;
use crate::types::query::LatLon;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Coordinates of one configured location.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for LatLon {
    fn from(location: Location) -> Self {
        LatLon(location.latitude, location.longitude)
    }
}

/// Locations and date range of an export run, in file order.
///
/// Dates are kept as written and checked when each location is fetched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportConfig {
    pub export_parent_path: PathBuf,
    pub start_date: String,
    pub end_date: String,
    pub selected_airports: IndexMap<String, Location>,
    /// Hourly variables to export; the crate defaults when absent.
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

impl ExportConfig {
    pub fn from_yaml_str(yaml: &str, origin: &Path) -> Result<Self, ExportError> {
        serde_yaml::from_str(yaml).map_err(|e| ExportError::ConfigParse(origin.to_path_buf(), e))
    }

    /// Reads and parses the config file at `path`.
    pub async fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExportError::ConfigRead(path.to_path_buf(), e))?;
        Self::from_yaml_str(&yaml, path)
    }
}
