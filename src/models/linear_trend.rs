//! Linear trend model: ordinary least squares of value on elapsed days

use crate::error::{ForecastError, Result};
use crate::features::FeatureMatrix;
use crate::models::{check_horizon, ForecastModel, ForecastResult, TrainedModel};
use statrs::statistics::Statistics;

/// Single-regressor linear regression over elapsed days.
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
}

/// Fitted linear trend model.
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    /// Name of the model
    name: String,
    /// Fitted slope (value per day)
    slope: f64,
    /// Fitted intercept (value at day 0)
    intercept: f64,
    /// Largest elapsed day present in the training partition
    max_train_day: i64,
}

impl LinearTrend {
    /// Create a new linear trend model
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
        }
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn fit(&self, features: &FeatureMatrix) -> Result<Self::Trained> {
        if features.is_empty() {
            return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
        }

        let xs: Vec<f64> = features.elapsed_days.iter().map(|&d| d as f64).collect();
        let x_mean = xs.iter().mean();
        let y_mean = features.values.iter().mean();

        let denom: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();

        // Zero regressor variance (a single row, or duplicated days) is
        // underdetermined; the fit degrades to a constant at the target mean
        // instead of failing.
        let (slope, intercept) = if denom.abs() < f64::EPSILON {
            (0.0, y_mean)
        } else {
            let numer: f64 = xs
                .iter()
                .zip(features.values.iter())
                .map(|(x, y)| (x - x_mean) * (y - y_mean))
                .sum();
            let slope = numer / denom;
            (slope, y_mean - slope * x_mean)
        };

        let max_train_day = *features.elapsed_days.iter().max().unwrap();

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            slope,
            intercept,
            max_train_day,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedLinearTrend {
    /// Fitted slope (value per day)
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Fitted intercept (value at day 0)
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Largest elapsed day present in the training partition.
    ///
    /// Forecasts extrapolate from here. With the randomized split this can
    /// be earlier than the series' true last day, when the most recent
    /// observations landed in the test partition.
    pub fn max_train_day(&self) -> i64 {
        self.max_train_day
    }
}

impl TrainedModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        check_horizon(horizon)?;

        let values = (1..=horizon)
            .map(|k| self.slope * (self.max_train_day + k as i64) as f64 + self.intercept)
            .collect();

        Ok(ForecastResult::from_values(values))
    }

    fn predict(&self, elapsed_days: &[i64]) -> Vec<f64> {
        elapsed_days
            .iter()
            .map(|&d| self.slope * d as f64 + self.intercept)
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
