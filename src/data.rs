//! Time series data handling for demand forecasting
//!
//! The store is built once from a raw CSV and is immutable afterwards. Rows
//! whose date or value cannot be parsed are dropped during ingestion; this is
//! silent data cleaning, not an error, and the dropped count stays observable
//! through [`TimeSeriesStore::rows_dropped`].

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Accepted date formats, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Canonical column names plus accepted aliases.
const DATE_COLUMN: &str = "Date";
const ENTITY_COLUMN: &str = "Product";
const ENTITY_ALIASES: &[&str] = &["product", "entity"];
const VALUE_COLUMN: &str = "Sales";
const VALUE_ALIASES: &[&str] = &["sales", "value"];

/// A single (date, entity, value) observation.
///
/// Values are taken as-is: negative sales pass through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Grouping key, e.g. a product name
    pub entity: String,
    /// Observed value, e.g. units sold
    pub value: f64,
}

/// Validated, date-ordered table of observations.
#[derive(Debug, Clone)]
pub struct TimeSeriesStore {
    /// Observations sorted ascending by date (stable: input order breaks ties)
    observations: Vec<Observation>,
    /// Data rows seen in the input, before cleaning
    rows_read: usize,
    /// Rows dropped because the date or value failed to parse
    rows_dropped: usize,
}

/// Per-entity view derived from a [`TimeSeriesStore`].
///
/// Each derivation re-filters from the store and owns its rows; an empty
/// series is a valid outcome, not an error.
#[derive(Debug, Clone)]
pub struct EntitySeries {
    entity: String,
    observations: Vec<Observation>,
}

/// Data loader for sales history CSVs
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load sales history from a CSV file.
    ///
    /// The header must contain date, entity and value columns
    /// (`Date`/`Product`/`Sales` in the canonical layout; matching is
    /// case-insensitive and `Entity`/`Value` are accepted aliases).
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeriesStore> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load sales history from any reader producing CSV bytes.
    pub fn from_reader<R: Read>(reader: R) -> Result<TimeSeriesStore> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let date_idx = find_column(&headers, &["date"])
            .ok_or_else(|| ForecastError::MissingColumn(DATE_COLUMN.to_string()))?;
        let entity_idx = find_column(&headers, ENTITY_ALIASES)
            .ok_or_else(|| ForecastError::MissingColumn(ENTITY_COLUMN.to_string()))?;
        let value_idx = find_column(&headers, VALUE_ALIASES)
            .ok_or_else(|| ForecastError::MissingColumn(VALUE_COLUMN.to_string()))?;

        let mut observations = Vec::new();
        let mut rows_read = 0;
        let mut rows_dropped = 0;

        for record in rdr.records() {
            let record = record?;
            rows_read += 1;

            let date = record.get(date_idx).and_then(parse_date);
            let value = record
                .get(value_idx)
                .and_then(|v| v.trim().parse::<f64>().ok());

            match (date, value) {
                (Some(date), Some(value)) => {
                    let entity = record.get(entity_idx).unwrap_or("").trim().to_string();
                    observations.push(Observation {
                        date,
                        entity,
                        value,
                    });
                }
                _ => rows_dropped += 1,
            }
        }

        observations.sort_by_key(|o| o.date);

        Ok(TimeSeriesStore {
            observations,
            rows_read,
            rows_dropped,
        })
    }

    /// Load sales history from an in-memory CSV string.
    pub fn from_csv_str(csv: &str) -> Result<TimeSeriesStore> {
        Self::from_reader(csv.as_bytes())
    }
}

/// Find a header column whose trimmed name matches one of `names`
/// case-insensitively.
fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim();
        names.iter().any(|n| h.eq_ignore_ascii_case(n))
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

impl TimeSeriesStore {
    /// Build a store from already-typed observations (used by tests and the
    /// synthetic generator). Rows are stably sorted by date.
    pub fn new(mut observations: Vec<Observation>) -> Self {
        let rows_read = observations.len();
        observations.sort_by_key(|o| o.date);
        Self {
            observations,
            rows_read,
            rows_dropped: 0,
        }
    }

    /// Observations in ascending date order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of data rows seen in the raw input
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Number of rows dropped during cleaning
    pub fn rows_dropped(&self) -> usize {
        self.rows_dropped
    }

    /// Check if the store holds no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of retained observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Distinct entity identifiers in first-seen order
    pub fn entities(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for obs in &self.observations {
            if !seen.iter().any(|e| e == &obs.entity) {
                seen.push(obs.entity.clone());
            }
        }
        seen
    }

    /// Derive the series for one entity.
    ///
    /// An entity with no rows yields an empty series; callers that require a
    /// non-empty series should check, or go through
    /// [`crate::pipeline::Loaded::select`] which reports the miss as an error.
    pub fn filter(&self, entity: &str) -> EntitySeries {
        let observations = self
            .observations
            .iter()
            .filter(|o| o.entity == entity)
            .cloned()
            .collect();

        EntitySeries {
            entity: entity.to_string(),
            observations,
        }
    }
}

impl EntitySeries {
    /// The entity this series belongs to
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Observations in ascending date order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Observation dates, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Observed values, in date order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Earliest observed date (day 0 of the elapsed-day regressor)
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// Latest observed date
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}
