//! # Demand Forecast
//!
//! A Rust library for demand forecasting over per-product sales history.
//!
//! ## Features
//!
//! - CSV ingestion with permissive cleaning (unparseable rows are dropped
//!   and counted, never fatal)
//! - Per-product time alignment: an elapsed-day regressor anchored on each
//!   product's earliest observation
//! - Reproducible randomized train/test splitting (pinned shuffle, seed 42)
//! - Forecast models: linear trend (OLS), moving average, trailing mean
//! - Held-out evaluation with MAE / MSE / RMSE
//! - A typestate pipeline that makes out-of-order orchestration a compile
//!   error, plus chart-ready payloads for a presentation layer
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::models::Method;
//! use demand_forecast::pipeline::Loaded;
//!
//! # fn main() -> demand_forecast::error::Result<()> {
//! let loaded = Loaded::from_csv_path("sales.csv")?;
//!
//! let trained = loaded
//!     .select("Widget A")?
//!     .split_default()?
//!     .train(Method::LinearTrend)?;
//!
//! let metrics = trained.evaluate()?;
//! let forecast = trained.forecast(7)?;
//! println!("{}", metrics);
//! println!("{:?}", forecast.values());
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod features;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod synthetic;

// Re-export commonly used types
pub use crate::data::{DataLoader, EntitySeries, Observation, TimeSeriesStore};
pub use crate::error::ForecastError;
pub use crate::features::{FeatureMatrix, TrainTestSplit};
pub use crate::metrics::EvalMetrics;
pub use crate::models::{ForecastModel, ForecastResult, Method, TrainedModel};
pub use crate::pipeline::{run_forecast, ForecastReport, ForecastRequest, Loaded};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
