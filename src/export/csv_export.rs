use crate::export::error::ExportError;
use crate::types::observation_table::ObservationTable;
use crate::utils::ensure_dir_exists;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;

/// File name used for one location and date range.
///
/// ```
/// use meteo_archive::csv_file_name;
///
/// assert_eq!(
///     csv_file_name("EHAM", "2024-01-01", "2024-01-31"),
///     "airport_EHAM_weather_2024-01-01_to_2024-01-31.csv"
/// );
/// ```
pub fn csv_file_name(location: &str, start_date: &str, end_date: &str) -> String {
    format!("airport_{}_weather_{}_to_{}.csv", location, start_date, end_date)
}

/// `<parent>/<location>/<csv_file_name>`.
pub fn csv_path(parent: &Path, location: &str, start_date: &str, end_date: &str) -> PathBuf {
    parent
        .join(location)
        .join(csv_file_name(location, start_date, end_date))
}

/// Writes `table` to `path` as CSV with a header row, creating parent
/// directories as needed.
///
/// Columns are `date` followed by the table's fields in order. Missing values
/// are written as empty cells.
pub async fn write_csv(table: &ObservationTable, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)
            .await
            .map_err(|e| ExportError::DirCreation(parent.to_path_buf(), e))?;
    }

    let mut df = table.to_frame().map_err(ExportError::Frame)?;
    let path_buf = path.to_path_buf();
    task::spawn_blocking(move || {
        let mut file = std::fs::File::create(&path_buf)
            .map_err(|e| ExportError::CsvWriteIo(path_buf.clone(), e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| ExportError::CsvWritePolars(path_buf.clone(), e))?;
        Ok::<(), ExportError>(())
    })
    .await??;

    info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
