use log::info;
use meteo_archive::{export_locations, ExportConfig, HistoricalWeather, WeatherError};
use tracing_subscriber::EnvFilter;

/// Locations and date range to export, relative to the working directory.
const CONFIG_PATH: &str = "config/get_historical_weather.yaml";
/// Response cache shared by all runs from the same working directory.
const CACHE_DIR: &str = ".cache";

#[tokio::main]
async fn main() -> Result<(), WeatherError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading the config file from {} ...", CONFIG_PATH);
    let config = ExportConfig::from_yaml_file(CONFIG_PATH).await?;

    let client = HistoricalWeather::with_cache_folder(CACHE_DIR).await?;
    let written = export_locations(&client, &config).await?;

    info!(
        "Exported {} locations to {}",
        written.len(),
        config.export_parent_path.display()
    );
    Ok(())
}
