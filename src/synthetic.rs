//! Seeded synthetic sales-history generation
//!
//! Companion to the forecasting pipeline for demos and tests: produces daily
//! per-product sales with a base level, a linear trend, a weekend uplift and
//! Gaussian noise, plus a CSV rendering in the ingestion schema.

use crate::data::{Observation, TimeSeriesStore};
use crate::error::{ForecastError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Demand profile for one synthetic product.
#[derive(Debug, Clone)]
pub struct ProductProfile {
    /// Product name (becomes the entity column)
    pub name: String,
    /// Base daily demand
    pub base: f64,
    /// Linear demand change per day
    pub daily_trend: f64,
    /// Standard deviation of the Gaussian noise
    pub noise_std: f64,
    /// Additive demand bump on Saturdays and Sundays
    pub weekend_uplift: f64,
}

impl ProductProfile {
    /// Profile with mild noise and no weekend effect
    pub fn new(name: impl Into<String>, base: f64, daily_trend: f64) -> Self {
        Self {
            name: name.into(),
            base,
            daily_trend,
            noise_std: base.abs() * 0.05,
            weekend_uplift: 0.0,
        }
    }
}

/// Generate `days` consecutive daily observations per product from `start`.
///
/// Sales are floored at zero; the same seed always produces the same rows.
pub fn generate(
    start: NaiveDate,
    days: usize,
    profiles: &[ProductProfile],
    seed: u64,
) -> Result<Vec<Observation>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut observations = Vec::with_capacity(days * profiles.len());

    for profile in profiles {
        let noise = Normal::new(0.0, profile.noise_std).map_err(|e| {
            ForecastError::InvalidParameter(format!(
                "Invalid noise_std {} for product '{}': {}",
                profile.noise_std, profile.name, e
            ))
        })?;

        for day in 0..days {
            let date = start + Duration::days(day as i64);
            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);

            let mut value = profile.base + profile.daily_trend * day as f64;
            if weekend {
                value += profile.weekend_uplift;
            }
            value += noise.sample(&mut rng);

            observations.push(Observation {
                date,
                entity: profile.name.clone(),
                value: value.max(0.0),
            });
        }
    }

    Ok(observations)
}

/// Generate observations directly into a sorted store
pub fn generate_store(
    start: NaiveDate,
    days: usize,
    profiles: &[ProductProfile],
    seed: u64,
) -> Result<TimeSeriesStore> {
    Ok(TimeSeriesStore::new(generate(start, days, profiles, seed)?))
}

/// Render observations as a CSV document in the ingestion schema
pub fn to_csv_string(observations: &[Observation]) -> String {
    let mut out = String::from("Date,Product,Sales\n");
    for obs in observations {
        out.push_str(&format!(
            "{},{},{:.2}\n",
            obs.date.format("%Y-%m-%d"),
            obs.entity,
            obs.value
        ));
    }
    out
}
