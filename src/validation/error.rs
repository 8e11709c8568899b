use thiserror::Error;

/// Rejection reasons for the parameters of a historical weather query.
///
/// Produced before any network traffic happens, so correcting the inputs and
/// calling again is always enough to recover.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameters {
    #[error("Invalid latitude given! Latitude must be within -90 to 90 (got {0})")]
    InvalidLatitude(f64),

    #[error("Invalid longitude given! Longitude must be within 0 to 180 (got {0})")]
    InvalidLongitude(f64),

    #[error("Invalid start_date {start_date} or end_date {end_date} found. Please give the start and end dates in ISO format, i.e. YYYY-MM-DD")]
    InvalidDateFormat {
        start_date: String,
        end_date: String,
    },

    #[error("End date cannot be before start date! (start {start_date}, end {end_date})")]
    DateOrderViolation {
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
    },

    #[error("At least one weather field must be requested")]
    EmptyFields,

    #[error("Weather field '{0}' was requested more than once")]
    DuplicateField(String),
}
