use crate::validation::error::InvalidParameters;
use chrono::NaiveDate;
use std::collections::HashSet;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks the scalar parameters of a query and returns the parsed date pair.
///
/// Rules are applied in a fixed order and the first violation wins:
/// latitude, longitude, date format, date ordering. Bounds are inclusive and
/// `NaN` coordinates are rejected.
///
/// # Errors
///
/// Returns the [`InvalidParameters`] variant matching the first failed rule.
///
/// # Examples
///
/// ```
/// use meteo_archive::{validate_parameters, InvalidParameters};
///
/// let (start, end) = validate_parameters(51.5, 0.0, "2024-01-01", "2024-01-02").unwrap();
/// assert!(start < end);
///
/// let err = validate_parameters(91.0, 0.0, "2024-01-01", "2024-01-02").unwrap_err();
/// assert_eq!(err, InvalidParameters::InvalidLatitude(91.0));
/// ```
pub fn validate_parameters(
    latitude: f64,
    longitude: f64,
    start_date: &str,
    end_date: &str,
) -> Result<(NaiveDate, NaiveDate), InvalidParameters> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(InvalidParameters::InvalidLatitude(latitude));
    }

    // Western hemisphere is rejected on purpose, see DESIGN.md.
    if !(0.0..=180.0).contains(&longitude) {
        return Err(InvalidParameters::InvalidLongitude(longitude));
    }

    let (start, end) = match (parse_iso_date(start_date), parse_iso_date(end_date)) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(InvalidParameters::InvalidDateFormat {
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
            })
        }
    };

    if end < start {
        return Err(InvalidParameters::DateOrderViolation {
            start_date: start,
            end_date: end,
        });
    }

    Ok((start, end))
}

/// Rejects an empty field list or one that names a field twice.
pub fn validate_fields(fields: &[String]) -> Result<(), InvalidParameters> {
    if fields.is_empty() {
        return Err(InvalidParameters::EmptyFields);
    }
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field.as_str()) {
            return Err(InvalidParameters::DuplicateField(field.clone()));
        }
    }
    Ok(())
}

// chrono alone would accept "2024-1-5" or "2024- 1-05", the wire format is
// strictly zero padded digits.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
