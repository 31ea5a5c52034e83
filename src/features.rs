//! Feature construction and train/test splitting
//!
//! The single regressor is the elapsed-day count since an entity's earliest
//! observation. The train/test split shuffles row indices with a pinned
//! generator so the partition is bit-for-bit reproducible across runs and
//! platforms; it is a randomized split, not a hold-out-the-tail split, so
//! test points land anywhere in the series' history.

use crate::data::EntitySeries;
use crate::error::{ForecastError, Result};

/// Default held-out fraction
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;
/// Default shuffle seed
pub const DEFAULT_SEED: u64 = 42;

/// Parallel (elapsed_days, values) sequences for one entity, date-ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    /// Integer day offsets from the earliest observation (first entry is 0)
    pub elapsed_days: Vec<i64>,
    /// Observed values, aligned with `elapsed_days`
    pub values: Vec<f64>,
}

impl FeatureMatrix {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Shuffled partition of a [`FeatureMatrix`] into train and test subsets.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    /// Training rows
    pub train: FeatureMatrix,
    /// Held-out rows
    pub test: FeatureMatrix,
    /// Original row indices assigned to the training partition
    pub train_indices: Vec<usize>,
    /// Original row indices assigned to the test partition
    pub test_indices: Vec<usize>,
}

/// Build the feature matrix for an entity series.
///
/// An empty series produces empty sequences rather than an error, so callers
/// downstream of [`crate::data::TimeSeriesStore::filter`] never crash on an
/// unknown entity.
pub fn build(series: &EntitySeries) -> FeatureMatrix {
    let first = match series.first_date() {
        Some(date) => date,
        None => return FeatureMatrix::default(),
    };

    let elapsed_days = series
        .observations()
        .iter()
        .map(|o| (o.date - first).num_days())
        .collect();

    FeatureMatrix {
        elapsed_days,
        values: series.values(),
    }
}

/// Partition a feature matrix into train and test subsets.
///
/// Row indices are permuted with a Fisher–Yates shuffle driven by a pinned
/// generator and the first `floor(n * (1 - test_fraction))` shuffled indices become the
/// training set. Empty input yields two empty partitions.
pub fn split(features: &FeatureMatrix, test_fraction: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_fraction) || test_fraction <= 0.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let n = features.len();
    let mut indices: Vec<usize> = (0..n).collect();

    let mut rng = Lcg::new(seed);
    // Fisher–Yates, walking down from the last index
    for i in (1..n).rev() {
        let j = rng.next_below(i + 1);
        indices.swap(i, j);
    }

    let train_len = (n as f64 * (1.0 - test_fraction)).floor() as usize;
    let train_indices = indices[..train_len].to_vec();
    let test_indices = indices[train_len..].to_vec();

    Ok(TrainTestSplit {
        train: take_rows(features, &train_indices),
        test: take_rows(features, &test_indices),
        train_indices,
        test_indices,
    })
}

fn take_rows(features: &FeatureMatrix, indices: &[usize]) -> FeatureMatrix {
    FeatureMatrix {
        elapsed_days: indices.iter().map(|&i| features.elapsed_days[i]).collect(),
        values: indices.iter().map(|&i| features.values[i]).collect(),
    }
}

/// 64-bit linear congruential generator (Knuth MMIX constants).
///
/// The split contract requires the permutation to reproduce exactly across
/// implementations, so the generator is pinned here instead of delegating to
/// a library RNG whose stream may change between versions. State is seeded
/// directly with the caller's seed; bounded draws use the top 32 bits.
#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform draw in `0..bound`. `bound` must be non-zero.
    fn next_below(&mut self, bound: usize) -> usize {
        ((self.next_u64() >> 32) % bound as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_stream_is_pinned() {
        // These values are part of the split contract; changing the
        // generator invalidates every recorded partition.
        let mut rng = Lcg::new(42);
        let a = rng.next_u64();
        let b = rng.next_u64();
        let mut again = Lcg::new(42);
        assert_eq!(a, again.next_u64());
        assert_eq!(b, again.next_u64());
        assert_ne!(a, b);
    }

    #[test]
    fn next_below_stays_in_bounds() {
        let mut rng = Lcg::new(7);
        for bound in 1..50usize {
            for _ in 0..20 {
                assert!(rng.next_below(bound) < bound);
            }
        }
    }
}
