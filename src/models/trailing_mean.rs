//! Trailing mean model: flat forecast from the last `horizon` observations

use crate::error::Result;
use crate::features::FeatureMatrix;
use crate::models::{check_horizon, ForecastModel, ForecastResult, TrainedModel};
use statrs::statistics::Statistics;

/// Trailing mean model.
///
/// The forecast level is the arithmetic mean of the most recent `horizon`
/// observations (or as many as exist), repeated across the horizon. The
/// level therefore depends on the horizon requested at forecast time, so
/// fitting only captures the series.
#[derive(Debug, Clone)]
pub struct TrailingMean {
    /// Name of the model
    name: String,
}

/// Fitted trailing mean model.
#[derive(Debug, Clone)]
pub struct TrainedTrailingMean {
    /// Name of the model
    name: String,
    /// Observed values, in date order
    values: Vec<f64>,
}

impl TrailingMean {
    /// Create a new trailing mean model
    pub fn new() -> Self {
        Self {
            name: "Trailing Mean".to_string(),
        }
    }
}

impl Default for TrailingMean {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for TrailingMean {
    type Trained = TrainedTrailingMean;

    fn fit(&self, features: &FeatureMatrix) -> Result<Self::Trained> {
        Ok(TrainedTrailingMean {
            name: self.name.clone(),
            values: features.values.clone(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedTrailingMean {
    /// Mean of the last `count` observations, or 0.0 for an empty series.
    fn trailing_level(&self, count: usize) -> f64 {
        let tail = &self.values[self.values.len().saturating_sub(count)..];
        if tail.is_empty() {
            0.0
        } else {
            tail.iter().mean()
        }
    }
}

impl TrainedModel for TrainedTrailingMean {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        check_horizon(horizon)?;
        let level = self.trailing_level(horizon);
        Ok(ForecastResult::from_values(vec![level; horizon]))
    }

    fn predict(&self, elapsed_days: &[i64]) -> Vec<f64> {
        let level = self.trailing_level(elapsed_days.len());
        vec![level; elapsed_days.len()]
    }

    fn name(&self) -> &str {
        &self.name
    }
}
