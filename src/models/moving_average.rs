//! Moving average model: flat forecast from the most recent window

use crate::error::{ForecastError, Result};
use crate::features::FeatureMatrix;
use crate::models::{check_horizon, ForecastModel, ForecastResult, TrainedModel};
use statrs::statistics::Statistics;

/// Simple moving average model.
///
/// The rolling mean of the most recent `window` values becomes a flat
/// multi-step forecast.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
}

/// Fitted moving average model.
#[derive(Debug, Clone)]
pub struct TrainedMovingAverage {
    /// Name of the model
    name: String,
    /// Flat forecast level
    level: f64,
}

impl MovingAverage {
    /// Create a new moving average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Moving Average (window={})", window),
            window,
        })
    }

    /// Window size
    pub fn window(&self) -> usize {
        self.window
    }
}

impl ForecastModel for MovingAverage {
    type Trained = TrainedMovingAverage;

    fn fit(&self, features: &FeatureMatrix) -> Result<Self::Trained> {
        let values = &features.values;

        // A series shorter than the window has no valid rolling mean; the
        // documented degenerate fallback is a flat zero forecast, not an
        // error.
        let level = if values.len() >= self.window {
            values[values.len() - self.window..].iter().mean()
        } else {
            0.0
        };

        Ok(TrainedMovingAverage {
            name: self.name.clone(),
            level,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedMovingAverage {
    /// The flat level repeated across the forecast horizon
    pub fn level(&self) -> f64 {
        self.level
    }
}

impl TrainedModel for TrainedMovingAverage {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        check_horizon(horizon)?;
        Ok(ForecastResult::from_values(vec![self.level; horizon]))
    }

    fn predict(&self, elapsed_days: &[i64]) -> Vec<f64> {
        vec![self.level; elapsed_days.len()]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
