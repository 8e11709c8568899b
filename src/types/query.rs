//! The validated, immutable description of a single archive request.

use crate::validation::error::InvalidParameters;
use crate::validation::validator::{validate_fields, validate_parameters};
use chrono::NaiveDate;

/// Hourly variables requested when the caller does not name any.
pub const DEFAULT_FIELDS: [&str; 3] = ["snowfall", "wind_speed_10m", "wind_gusts_10m"];

/// Returns [`DEFAULT_FIELDS`] as owned strings.
pub fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
}

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use meteo_archive::LatLon;
///
/// let zurich = LatLon(47.4582, 8.5555);
/// assert_eq!(zurich.0, 47.4582); // Latitude
/// assert_eq!(zurich.1, 8.5555); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A historical weather query whose parameters have passed validation.
///
/// The only way to obtain one is [`Query::new`], so holding a `Query` means
/// the coordinates are in range, both dates parsed, `start_date <= end_date`
/// and the field list is non-empty without duplicates. The order of `fields`
/// is the column order of the resulting table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    location: LatLon,
    start_date: NaiveDate,
    end_date: NaiveDate,
    fields: Vec<String>,
}

impl Query {
    /// Validates the raw parameters and builds a `Query`.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidParameters`] rule violated, checked in the
    /// order latitude, longitude, date format, date ordering, fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteo_archive::Query;
    ///
    /// let query = Query::new(51.5, 0.0, "2024-01-01", "2024-01-02", vec!["snowfall".into()])?;
    /// assert_eq!(query.fields(), ["snowfall"]);
    /// # Ok::<(), meteo_archive::InvalidParameters>(())
    /// ```
    pub fn new(
        latitude: f64,
        longitude: f64,
        start_date: &str,
        end_date: &str,
        fields: Vec<String>,
    ) -> Result<Self, InvalidParameters> {
        let (start_date, end_date) = validate_parameters(latitude, longitude, start_date, end_date)?;
        validate_fields(&fields)?;
        Ok(Self {
            location: LatLon(latitude, longitude),
            start_date,
            end_date,
            fields,
        })
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn latitude(&self) -> f64 {
        self.location.0
    }

    pub fn longitude(&self) -> f64 {
        self.location.1
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}
