use crate::error::WeatherError;
use crate::export::config::ExportConfig;
use crate::export::csv_export::{csv_path, write_csv};
use crate::historical_weather::HistoricalWeather;
use log::info;
use std::path::PathBuf;

/// Fetches every configured location and writes one CSV per location.
///
/// Locations are processed one after another in config order. The first
/// failure aborts the run; files already written are kept. Returns the paths
/// written.
pub async fn export_locations(
    client: &HistoricalWeather,
    config: &ExportConfig,
) -> Result<Vec<PathBuf>, WeatherError> {
    let mut written = Vec::with_capacity(config.selected_airports.len());

    for (name, location) in &config.selected_airports {
        info!("Start making API call for the airport {} ...", name);

        let table = client
            .fetch()
            .latitude(location.latitude)
            .longitude(location.longitude)
            .start_date(&config.start_date)
            .end_date(&config.end_date)
            .maybe_fields(config.fields.clone())
            .call()
            .await?;

        let path = csv_path(
            &config.export_parent_path,
            name,
            &config.start_date,
            &config.end_date,
        );
        write_csv(&table, &path).await?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::config::Location;
    use crate::validation::error::InvalidParameters;
    use crate::weather_data::fetcher::tests::FakeProvider;
    use crate::weather_data::observer::RecordingObserver;
    use indexmap::IndexMap;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn config(parent: PathBuf, airports: &[(&str, f64, f64)]) -> ExportConfig {
        let selected_airports: IndexMap<String, Location> = airports
            .iter()
            .map(|(name, latitude, longitude)| {
                (
                    name.to_string(),
                    Location {
                        latitude: *latitude,
                        longitude: *longitude,
                    },
                )
            })
            .collect();
        ExportConfig {
            export_parent_path: parent,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-02".to_string(),
            selected_airports,
            fields: None,
        }
    }

    #[tokio::test]
    async fn test_exports_one_file_per_location() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let provider = FakeProvider::hourly(24);
        let requests = provider.requests.clone();
        let client =
            HistoricalWeather::with_provider(Box::new(provider), Arc::new(RecordingObserver::new()));
        let config = config(
            dir.path().join("exports"),
            &[("LSZH", 47.4582, 8.5555), ("EHAM", 52.3086, 4.7639)],
        );

        let written = export_locations(&client, &config).await?;

        assert_eq!(
            written,
            vec![
                dir.path()
                    .join("exports/LSZH/airport_LSZH_weather_2024-01-01_to_2024-01-02.csv"),
                dir.path()
                    .join("exports/EHAM/airport_EHAM_weather_2024-01-01_to_2024-01-02.csv"),
            ]
        );
        for path in &written {
            let contents = std::fs::read_to_string(path)?;
            let mut lines = contents.lines();
            assert_eq!(
                lines.next(),
                Some("date,snowfall,wind_speed_10m,wind_gusts_10m")
            );
            assert_eq!(lines.count(), 24);
        }

        let sent = requests.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].latitude, 47.4582);
        assert_eq!(sent[1].latitude, 52.3086);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_location_aborts_run() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let client = HistoricalWeather::with_provider(
            Box::new(FakeProvider::hourly(24)),
            Arc::new(RecordingObserver::new()),
        );
        let config = config(
            dir.path().to_path_buf(),
            &[("KJFK", 40.6413, -73.7781), ("EHAM", 52.3086, 4.7639)],
        );

        let err = export_locations(&client, &config).await.unwrap_err();
        assert!(matches!(
            err,
            WeatherError::InvalidParameters(InvalidParameters::InvalidLongitude(_))
        ));
        assert!(!dir.path().join("EHAM").exists());
        Ok(())
    }
}
