//! Metrics for evaluating forecast accuracy against held-out actuals

use crate::error::{ForecastError, Result};
use serde::Serialize;

/// Mean Absolute Error: `mean(|actual - predicted|)`
pub fn mae(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_inputs(actual, predicted)?;
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Mean Squared Error: `mean((actual - predicted)^2)`
pub fn mse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_inputs(actual, predicted)?;
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Ok(sum / actual.len() as f64)
}

/// Root Mean Squared Error: `sqrt(MSE)`
pub fn rmse(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(mse(actual, predicted)?.sqrt())
}

/// Evaluate a prediction sequence against held-out actuals.
///
/// The sequences must have equal, non-zero length; nothing beyond the three
/// scale-dependent metrics is computed, and no accuracy classification is
/// attached.
pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<EvalMetrics> {
    validate_inputs(actual, predicted)?;
    let mse = mse(actual, predicted)?;

    Ok(EvalMetrics {
        mae: mae(actual, predicted)?,
        mse,
        rmse: mse.sqrt(),
    })
}

fn validate_inputs(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::ShapeMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    Ok(())
}

/// Forecast accuracy metrics
#[derive(Debug, Clone, Serialize)]
pub struct EvalMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

impl std::fmt::Display for EvalMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Model Evaluation:")?;
        writeln!(f, "  MAE:  {:.2}", self.mae)?;
        writeln!(f, "  MSE:  {:.2}", self.mse)?;
        writeln!(f, "  RMSE: {:.2}", self.rmse)?;
        Ok(())
    }
}
