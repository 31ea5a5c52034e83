//! Forecasting models for per-entity sales series
//!
//! Three variants: an OLS linear trend over elapsed days, a flat
//! moving-average forecast, and a flat trailing-mean forecast. The set is
//! closed: [`Method`] selects a variant and
//! [`TrainedMethod`] dispatches exhaustively, so call sites cannot forget a
//! model.

use crate::error::{ForecastError, Result};
use crate::features::FeatureMatrix;
use serde::Serialize;
use std::fmt::Debug;

pub mod linear_trend;
pub mod moving_average;
pub mod trailing_mean;

pub use linear_trend::{LinearTrend, TrainedLinearTrend};
pub use moving_average::{MovingAverage, TrainedMovingAverage};
pub use trailing_mean::{TrailingMean, TrainedTrailingMean};

/// One forecasted step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Days after the forecast anchor, starting at 1
    pub days_ahead: usize,
    /// Predicted value for that day
    pub predicted_value: f64,
}

/// Ordered multi-step forecast produced by a trained model.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
}

impl ForecastResult {
    /// Build a result from raw predicted values; `days_ahead` runs 1..=n.
    pub fn from_values(values: Vec<f64>) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, predicted_value)| ForecastPoint {
                days_ahead: i + 1,
                predicted_value,
            })
            .collect();
        Self { points }
    }

    /// The forecasted points, in days-ahead order
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Just the predicted values, in days-ahead order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_value).collect()
    }

    /// Number of forecasted periods
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    /// Serialize the forecast table for the presentation layer
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.points)?)
    }
}

/// Forecast model that can be fitted to a feature matrix
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Trained: TrainedModel;

    /// Fit the model. Flat models ignore the regressor column.
    fn fit(&self, features: &FeatureMatrix) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Fitted forecast model
pub trait TrainedModel: Debug {
    /// Generate a forecast for `horizon` future periods
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Predict one value per requested elapsed-day point.
    ///
    /// Flat models ignore the regressor and repeat their level; this is the
    /// sequence the evaluator compares against held-out actuals.
    fn predict(&self, elapsed_days: &[i64]) -> Vec<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Model selection supplied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Method {
    /// OLS of value on elapsed days
    LinearTrend,
    /// Flat forecast from the rolling mean of the most recent `window` values
    MovingAverage { window: usize },
    /// Flat forecast from the mean of the last `horizon` values
    TrailingMean,
}

/// A fitted model of any variant.
///
/// Matching is exhaustive everywhere this enum is consumed; adding a variant
/// is a compile-time event for every call site.
#[derive(Debug, Clone)]
pub enum TrainedMethod {
    LinearTrend(TrainedLinearTrend),
    MovingAverage(TrainedMovingAverage),
    TrailingMean(TrainedTrailingMean),
}

impl TrainedMethod {
    /// Generate a forecast for `horizon` future periods
    pub fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        match self {
            TrainedMethod::LinearTrend(m) => m.forecast(horizon),
            TrainedMethod::MovingAverage(m) => m.forecast(horizon),
            TrainedMethod::TrailingMean(m) => m.forecast(horizon),
        }
    }

    /// Predict one value per requested elapsed-day point
    pub fn predict(&self, elapsed_days: &[i64]) -> Vec<f64> {
        match self {
            TrainedMethod::LinearTrend(m) => m.predict(elapsed_days),
            TrainedMethod::MovingAverage(m) => m.predict(elapsed_days),
            TrainedMethod::TrailingMean(m) => m.predict(elapsed_days),
        }
    }

    /// Name of the fitted model
    pub fn name(&self) -> &str {
        match self {
            TrainedMethod::LinearTrend(m) => m.name(),
            TrainedMethod::MovingAverage(m) => m.name(),
            TrainedMethod::TrailingMean(m) => m.name(),
        }
    }
}

/// Shared horizon validation for the forecast entry points.
pub(crate) fn check_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "Forecast horizon must be positive".to_string(),
        ));
    }
    Ok(())
}
