//! Contains the `ObservationTable` produced from a provider response.

use chrono::{DateTime, SecondsFormat, Utc};
use polars::prelude::*;

/// Name of the timestamp column in frames and CSV exports.
pub const DATE_COLUMN: &str = "date";

/// A single row of an [`ObservationTable`].
///
/// `values` is aligned by position with [`ObservationTable::fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<Option<f64>>,
}

/// Hourly observations for one location, one column per requested field.
///
/// The table is stored column-wise, mirroring the provider's response layout.
/// Timestamps are strictly ascending and evenly spaced, and every column has
/// exactly one entry per timestamp. Missing observations are `None`.
///
/// Instances are created by the reshaper and are not mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    fields: Vec<String>,
    timestamps: Vec<DateTime<Utc>>,
    columns: Vec<Vec<Option<f64>>>,
}

impl ObservationTable {
    /// Shape checks are the reshaper's job, this constructor trusts its input.
    pub(crate) fn new(
        fields: Vec<String>,
        timestamps: Vec<DateTime<Utc>>,
        columns: Vec<Vec<Option<f64>>>,
    ) -> Self {
        debug_assert_eq!(fields.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == timestamps.len()));
        Self {
            fields,
            timestamps,
            columns,
        }
    }

    /// Requested field names, in column order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Values of a single field, or `None` when the field was not requested.
    pub fn column(&self, field: &str) -> Option<&[Option<f64>]> {
        self.fields
            .iter()
            .position(|f| f == field)
            .map(|idx| self.columns[idx].as_slice())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Returns the row at `index`, if any.
    pub fn row(&self, index: usize) -> Option<ObservationRow> {
        let timestamp = *self.timestamps.get(index)?;
        Some(ObservationRow {
            timestamp,
            values: self.columns.iter().map(|c| c[index]).collect(),
        })
    }

    /// Iterates over the rows in timestamp order.
    pub fn rows(&self) -> impl Iterator<Item = ObservationRow> + '_ {
        (0..self.len()).filter_map(move |idx| self.row(idx))
    }

    /// Converts the table into a Polars `DataFrame`.
    ///
    /// The first column is `date`, holding RFC 3339 UTC timestamps such as
    /// `2024-01-01T00:00:00Z`, followed by one `f64` column per field in
    /// request order.
    ///
    /// # Errors
    ///
    /// Returns a [`PolarsError`] if the frame cannot be assembled, e.g. when a
    /// field is named `date`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self
            .timestamps
            .iter()
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
            .collect();

        let mut columns = Vec::with_capacity(self.fields.len() + 1);
        columns.push(Column::new(DATE_COLUMN.into(), dates));
        for (field, values) in self.fields.iter().zip(&self.columns) {
            columns.push(Column::new(field.as_str().into(), values.as_slice()));
        }
        DataFrame::new(columns)
    }
}
