//! Error types for the demand_forecast crate

use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A required column is missing from the input header
    #[error("Missing required column '{0}' in the CSV header")]
    MissingColumn(String),

    /// No observations exist for the requested entity
    #[error("No data available for entity '{0}'")]
    EmptySeries(String),

    /// A fit was requested on fewer observations than the model needs
    #[error("Insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Actual and predicted sequences have different lengths
    #[error("Shape mismatch: {actual} actual values vs {predicted} predicted values")]
    ShapeMismatch { actual: usize, predicted: usize },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON serialization of a result payload
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
