//! Typestate forecasting pipeline
//!
//! Each stage consumes the previous stage's handle and returns the next one
//! (`Loaded` → `Filtered` → `Split` → `Trained`), so invoking a step out of
//! order is a compile error rather than a runtime guard.

use crate::data::{DataLoader, EntitySeries, TimeSeriesStore};
use crate::error::{ForecastError, Result};
use crate::features::{self, FeatureMatrix, TrainTestSplit, DEFAULT_SEED, DEFAULT_TEST_FRACTION};
use crate::metrics::{self, EvalMetrics};
use crate::models::{
    ForecastModel, ForecastResult, LinearTrend, Method, MovingAverage, TrailingMean, TrainedMethod,
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Pipeline stage: a validated store is in memory.
#[derive(Debug, Clone)]
pub struct Loaded {
    store: TimeSeriesStore,
}

/// Pipeline stage: one entity's series and features are prepared.
#[derive(Debug, Clone)]
pub struct Filtered {
    series: EntitySeries,
    features: FeatureMatrix,
}

/// Pipeline stage: the features are partitioned into train and test sets.
#[derive(Debug, Clone)]
pub struct Split {
    series: EntitySeries,
    features: FeatureMatrix,
    partition: TrainTestSplit,
}

/// Pipeline stage: a model has been fitted and can evaluate or forecast.
#[derive(Debug, Clone)]
pub struct Trained {
    series: EntitySeries,
    partition: TrainTestSplit,
    model: TrainedMethod,
}

impl Loaded {
    /// Ingest a CSV file from disk
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            store: DataLoader::from_csv(path)?,
        })
    }

    /// Ingest CSV bytes from any reader (e.g. an uploaded file)
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self {
            store: DataLoader::from_reader(reader)?,
        })
    }

    /// Ingest an in-memory CSV string
    pub fn from_csv_str(csv: &str) -> Result<Self> {
        Ok(Self {
            store: DataLoader::from_csv_str(csv)?,
        })
    }

    /// Wrap an already-built store
    pub fn new(store: TimeSeriesStore) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &TimeSeriesStore {
        &self.store
    }

    /// Entity identifiers available for selection, first-seen order
    pub fn entities(&self) -> Vec<String> {
        self.store.entities()
    }

    /// Select one entity and build its features.
    ///
    /// Unlike the raw [`TimeSeriesStore::filter`], a miss here is an error:
    /// the caller is expected to re-prompt the selection. The stage borrows
    /// the store, so several entities can be selected from one load.
    pub fn select(&self, entity: &str) -> Result<Filtered> {
        let series = self.store.filter(entity);
        if series.is_empty() {
            return Err(ForecastError::EmptySeries(entity.to_string()));
        }

        let features = features::build(&series);
        Ok(Filtered { series, features })
    }
}

impl Filtered {
    /// The selected entity's series
    pub fn series(&self) -> &EntitySeries {
        &self.series
    }

    /// The elapsed-day feature matrix
    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    /// Partition into train and test sets with an explicit fraction and seed
    pub fn split(self, test_fraction: f64, seed: u64) -> Result<Split> {
        let partition = features::split(&self.features, test_fraction, seed)?;
        Ok(Split {
            series: self.series,
            features: self.features,
            partition,
        })
    }

    /// Partition with the default settings (20% held out, seed 42)
    pub fn split_default(self) -> Result<Split> {
        self.split(DEFAULT_TEST_FRACTION, DEFAULT_SEED)
    }
}

impl Split {
    /// The train/test partition
    pub fn partition(&self) -> &TrainTestSplit {
        &self.partition
    }

    /// Fit the selected model variant.
    ///
    /// The linear trend fits the training partition only; the flat models
    /// summarize the full unsplit series.
    pub fn train(self, method: Method) -> Result<Trained> {
        let model = match method {
            Method::LinearTrend => {
                TrainedMethod::LinearTrend(LinearTrend::new().fit(&self.partition.train)?)
            }
            Method::MovingAverage { window } => {
                TrainedMethod::MovingAverage(MovingAverage::new(window)?.fit(&self.features)?)
            }
            Method::TrailingMean => {
                TrainedMethod::TrailingMean(TrailingMean::new().fit(&self.features)?)
            }
        };

        Ok(Trained {
            series: self.series,
            partition: self.partition,
            model,
        })
    }
}

impl Trained {
    /// The fitted model
    pub fn model(&self) -> &TrainedMethod {
        &self.model
    }

    /// Evaluate on the held-out partition.
    ///
    /// Fails with `InsufficientData` when the test partition is empty, which
    /// happens for very short series.
    pub fn evaluate(&self) -> Result<EvalMetrics> {
        let predicted = self.model.predict(&self.partition.test.elapsed_days);
        metrics::evaluate(&self.partition.test.values, &predicted)
    }

    /// Forecast `horizon` future periods
    pub fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        self.model.forecast(horizon)
    }

    /// Line-chart payload: the historical series plus the forecast overlay.
    ///
    /// Forecast dates anchor on the series' last observed date, even though
    /// the linear trend extrapolates from the training partition's maximum
    /// elapsed day.
    pub fn chart(&self, forecast: &ForecastResult) -> Vec<ChartSeries> {
        let entity = self.series.entity();

        let historical = ChartSeries {
            name: format!("{} - Historical Sales", entity),
            points: self
                .series
                .observations()
                .iter()
                .map(|o| ChartPoint {
                    date: o.date,
                    value: o.value,
                })
                .collect(),
        };

        let forecast_points = match self.series.last_date() {
            Some(last) => forecast
                .points()
                .iter()
                .map(|p| ChartPoint {
                    date: last + Duration::days(p.days_ahead as i64),
                    value: p.predicted_value,
                })
                .collect(),
            None => Vec::new(),
        };

        let forecasted = ChartSeries {
            name: format!("{} - Forecasted Sales", entity),
            points: forecast_points,
        };

        vec![historical, forecasted]
    }

    /// Produce the full success payload for the presentation layer.
    ///
    /// Metrics are `None` when the held-out partition is empty; the forecast
    /// and chart are still produced.
    pub fn report(&self, horizon: usize) -> Result<ForecastReport> {
        let forecast = self.forecast(horizon)?;
        let metrics = self.evaluate().ok();
        let chart = self.chart(&forecast);

        Ok(ForecastReport {
            entity: self.series.entity().to_string(),
            model: self.model.name().to_string(),
            forecast,
            metrics,
            chart,
        })
    }
}

/// One point of a line-chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Calendar date of the point
    pub date: NaiveDate,
    /// Value at that date
    pub value: f64,
}

/// A named, date-ordered line-chart series.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    /// Display name, e.g. "Widget A - Forecasted Sales"
    pub name: String,
    /// Ordered points
    pub points: Vec<ChartPoint>,
}

/// User selections supplied by the presentation layer.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    /// Entity to forecast
    pub entity: String,
    /// Model variant to fit
    pub method: Method,
    /// Number of future days to forecast
    pub horizon: usize,
    /// Held-out fraction for evaluation
    pub test_fraction: f64,
    /// Shuffle seed for the train/test split
    pub seed: u64,
}

impl ForecastRequest {
    /// Build a request with the default split settings
    pub fn new(entity: impl Into<String>, method: Method, horizon: usize) -> Self {
        Self {
            entity: entity.into(),
            method,
            horizon,
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

/// Success payload returned to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    /// Entity that was forecast
    pub entity: String,
    /// Name of the fitted model
    pub model: String,
    /// Forecast table (days_ahead, predicted_value)
    pub forecast: ForecastResult,
    /// Held-out evaluation metrics, when the test partition was non-empty
    pub metrics: Option<EvalMetrics>,
    /// Historical and forecast overlay series for a line chart
    pub chart: Vec<ChartSeries>,
}

impl ForecastReport {
    /// Serialize the payload for the presentation layer
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Run the whole pipeline for one request.
///
/// This is the collaborator contract with the presentation layer: raw CSV
/// bytes and user selections in, a success payload or a displayable failure
/// reason (the error's `Display` string) out. No step here panics on bad
/// input.
pub fn run_forecast<R: Read>(reader: R, request: &ForecastRequest) -> Result<ForecastReport> {
    Loaded::from_reader(reader)?
        .select(&request.entity)?
        .split(request.test_fraction, request.seed)?
        .train(request.method)?
        .report(request.horizon)
}
