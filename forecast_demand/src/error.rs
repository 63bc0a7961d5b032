//! Error types for the forecast_demand crate

use thiserror::Error;

/// Custom error types for the forecast_demand crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Request failed validation before any feature was built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No model, schema or encoder artifacts are loaded. Retryable by the
    /// operator once artifacts are in place, never a client fault.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// An artifact could not be loaded or failed structural validation
    #[error("Artifact error: {0}")]
    ArtifactError(String),

    /// The model failed while scoring a feature matrix
    #[error("Prediction error: {0}")]
    PredictionError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::JsonError(err.to_string())
    }
}
