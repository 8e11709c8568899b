use crate::provider::HourlyBlock;
use crate::types::observation_table::ObservationTable;
use crate::weather_data::error::ReshapeError;
use chrono::{DateTime, Utc};

/// Number of stamps in `[start, end)` at `interval` second steps.
pub fn step_count(start: i64, end: i64, interval: i64) -> Result<usize, ReshapeError> {
    if interval <= 0 {
        return Err(ReshapeError::NonPositiveInterval(interval));
    }
    if end <= start {
        return Ok(0);
    }
    // Widened so that spans close to the i64 limits cannot overflow.
    let span = end as i128 - start as i128;
    let interval = interval as i128;
    usize::try_from((span + interval - 1) / interval)
        .map_err(|_| ReshapeError::TimestampOutOfRange(end))
}

/// Timestamps from `start` to `end` (exclusive) in steps of `interval` seconds.
pub fn time_range(start: i64, end: i64, interval: i64) -> Result<Vec<DateTime<Utc>>, ReshapeError> {
    let count = step_count(start, end, interval)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    // Checking the last stamp first keeps absurd ranges from being built.
    let last = start as i128 + (count as i128 - 1) * interval as i128;
    let last = i64::try_from(last).map_err(|_| ReshapeError::TimestampOutOfRange(end))?;
    if DateTime::from_timestamp(last, 0).is_none() {
        return Err(ReshapeError::TimestampOutOfRange(last));
    }

    (0..count as i64)
        .map(|step| {
            let ts = start + step * interval;
            DateTime::from_timestamp(ts, 0).ok_or(ReshapeError::TimestampOutOfRange(ts))
        })
        .collect()
}

/// Turns a provider's hourly block into an [`ObservationTable`].
///
/// Column `i` of the table is `block.variables[i]`, labelled `fields[i]`. Row
/// order is timestamp order.
///
/// # Errors
///
/// Fails when the interval is not positive, when the number of variables does
/// not match `fields`, or when any variable's length differs from the number
/// of generated timestamps.
pub fn reshape(fields: &[String], block: HourlyBlock) -> Result<ObservationTable, ReshapeError> {
    let expected = step_count(block.time, block.time_end, block.interval)?;

    if block.variables.len() != fields.len() {
        return Err(ReshapeError::FieldCountMismatch {
            expected: fields.len(),
            found: block.variables.len(),
        });
    }

    for (field, values) in fields.iter().zip(&block.variables) {
        if values.len() != expected {
            return Err(ReshapeError::LengthMismatch {
                field: field.clone(),
                expected,
                found: values.len(),
            });
        }
    }

    let timestamps = time_range(block.time, block.time_end, block.interval)?;
    Ok(ObservationTable::new(
        fields.to_vec(),
        timestamps,
        block.variables,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    // 2024-01-01T00:00:00Z
    const T0: i64 = 1_704_067_200;

    fn fields() -> Vec<String> {
        vec!["snowfall".to_string(), "wind_gusts_10m".to_string()]
    }

    fn block(n: usize) -> HourlyBlock {
        HourlyBlock {
            time: T0,
            time_end: T0 + 3600 * n as i64,
            interval: 3600,
            variables: vec![
                (0..n).map(|i| Some(i as f64 * 0.1)).collect(),
                (0..n).map(|i| Some(20.0 + i as f64)).collect(),
            ],
        }
    }

    #[test]
    fn test_reshape_fixture() -> Result<(), ReshapeError> {
        let n = 6;
        let source = block(n);
        let table = reshape(&fields(), source.clone())?;

        assert_eq!(table.len(), n);
        assert_eq!(table.fields(), fields().as_slice());

        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for (i, row) in table.rows().enumerate() {
            assert_eq!(row.timestamp, t0 + Duration::hours(i as i64));
            assert_eq!(row.values[0], source.variables[0][i]);
            assert_eq!(row.values[1], source.variables[1][i]);
        }
        Ok(())
    }

    #[test]
    fn test_time_range_is_right_open() -> Result<(), ReshapeError> {
        let stamps = time_range(T0, T0 + 3 * 3600, 3600)?;
        assert_eq!(stamps.len(), 3);
        assert_eq!(stamps[2].timestamp(), T0 + 2 * 3600);

        // A partial last step still yields a stamp before the end.
        assert_eq!(time_range(0, 7000, 3600)?.len(), 2);
        assert!(time_range(T0, T0, 3600)?.is_empty());
        assert!(time_range(T0, T0 - 3600, 3600)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_empty_block() -> Result<(), ReshapeError> {
        let table = reshape(&fields(), block(0))?;
        assert!(table.is_empty());
        assert_eq!(table.fields().len(), 2);
        Ok(())
    }

    #[test]
    fn test_non_positive_interval() {
        let mut source = block(2);
        source.interval = 0;
        assert_eq!(
            reshape(&fields(), source).unwrap_err(),
            ReshapeError::NonPositiveInterval(0)
        );
    }

    #[test]
    fn test_length_mismatch() {
        let mut source = block(4);
        source.variables[1].pop();
        assert_eq!(
            reshape(&fields(), source).unwrap_err(),
            ReshapeError::LengthMismatch {
                field: "wind_gusts_10m".to_string(),
                expected: 4,
                found: 3,
            }
        );
    }

    #[test]
    fn test_extreme_bounds_are_errors() {
        assert_eq!(
            time_range(0, i64::MAX, 2).unwrap_err(),
            ReshapeError::TimestampOutOfRange(i64::MAX)
        );
        assert_eq!(step_count(i64::MIN, i64::MAX, i64::MAX), Ok(3));
        assert!(matches!(
            time_range(i64::MIN, i64::MAX, i64::MAX),
            Err(ReshapeError::TimestampOutOfRange(_))
        ));
    }

    #[test]
    fn test_far_future_end_reports_length_mismatch() {
        let mut source = block(3);
        source.time_end = i64::MAX;
        assert_eq!(
            reshape(&fields(), source).unwrap_err(),
            ReshapeError::LengthMismatch {
                field: "snowfall".to_string(),
                expected: ((i64::MAX - T0 + 3599) / 3600) as usize,
                found: 3,
            }
        );
    }

    #[test]
    fn test_field_count_mismatch() {
        let source = block(2);
        let err = reshape(&["snowfall".to_string()], source).unwrap_err();
        assert_eq!(
            err,
            ReshapeError::FieldCountMismatch {
                expected: 1,
                found: 2
            }
        );
    }
}
