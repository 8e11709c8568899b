use crate::export::error::ExportError;
use crate::provider::error::ProviderError;
use crate::validation::error::InvalidParameters;
use crate::weather_data::error::ReshapeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    InvalidParameters(#[from] InvalidParameters),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Reshape(#[from] ReshapeError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to determine cache directory")]
    CacheDirResolution(#[source] std::io::Error),
}
