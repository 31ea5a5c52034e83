use demand_forecast::data::DataLoader;
use demand_forecast::features::{build, split, DEFAULT_SEED, DEFAULT_TEST_FRACTION};
use demand_forecast::{FeatureMatrix, ForecastError};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn widget_features() -> FeatureMatrix {
    let csv = "\
Date,Product,Sales
2020-01-01,Widget A,10
2020-01-03,Widget A,30
2020-01-06,Widget A,60
2020-01-10,Widget A,100
";
    let store = DataLoader::from_csv_str(csv).unwrap();
    build(&store.filter("Widget A"))
}

#[test]
fn elapsed_days_anchor_at_zero() {
    let features = widget_features();

    assert_eq!(features.elapsed_days, vec![0, 2, 5, 9]);
    assert_eq!(features.values, vec![10.0, 30.0, 60.0, 100.0]);
    assert_eq!(features.elapsed_days[0], 0);
}

#[test]
fn elapsed_days_are_non_decreasing() {
    let features = widget_features();

    for pair in features.elapsed_days.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn empty_series_builds_empty_features() {
    let store = DataLoader::from_csv_str("Date,Product,Sales\n").unwrap();
    let features = build(&store.filter("anything"));

    assert!(features.is_empty());
    assert_eq!(features.len(), 0);
}

#[test]
fn split_is_deterministic_for_a_fixed_seed() {
    let features = FeatureMatrix {
        elapsed_days: (0..20).collect(),
        values: (0..20).map(|v| v as f64).collect(),
    };

    let first = split(&features, DEFAULT_TEST_FRACTION, DEFAULT_SEED).unwrap();
    let second = split(&features, DEFAULT_TEST_FRACTION, DEFAULT_SEED).unwrap();

    assert_eq!(first.train_indices, second.train_indices);
    assert_eq!(first.test_indices, second.test_indices);
    assert_eq!(first.train, second.train);
    assert_eq!(first.test, second.test);
}

#[test]
fn different_seeds_shuffle_differently() {
    let features = FeatureMatrix {
        elapsed_days: (0..50).collect(),
        values: (0..50).map(|v| v as f64).collect(),
    };

    let a = split(&features, 0.2, 42).unwrap();
    let b = split(&features, 0.2, 43).unwrap();

    assert_ne!(a.train_indices, b.train_indices);
}

#[rstest]
#[case(10, 8, 2)]
#[case(5, 4, 1)]
#[case(3, 2, 1)]
#[case(1, 0, 1)]
fn train_size_is_floored(#[case] n: usize, #[case] train: usize, #[case] test: usize) {
    let features = FeatureMatrix {
        elapsed_days: (0..n as i64).collect(),
        values: vec![1.0; n],
    };

    let parts = split(&features, 0.2, DEFAULT_SEED).unwrap();
    assert_eq!(parts.train.len(), train);
    assert_eq!(parts.test.len(), test);
}

#[test]
fn split_partitions_every_index_exactly_once() {
    let features = FeatureMatrix {
        elapsed_days: (0..17).collect(),
        values: vec![0.0; 17],
    };

    let parts = split(&features, 0.25, 7).unwrap();
    let mut all: Vec<usize> = parts
        .train_indices
        .iter()
        .chain(parts.test_indices.iter())
        .copied()
        .collect();
    all.sort_unstable();

    assert_eq!(all, (0..17).collect::<Vec<_>>());
}

#[test]
fn split_rows_carry_matching_features() {
    let features = FeatureMatrix {
        elapsed_days: vec![0, 3, 7, 9, 12],
        values: vec![1.0, 2.0, 3.0, 4.0, 5.0],
    };

    let parts = split(&features, 0.2, 1).unwrap();
    for (slot, &idx) in parts.train_indices.iter().enumerate() {
        assert_eq!(parts.train.elapsed_days[slot], features.elapsed_days[idx]);
        assert_eq!(parts.train.values[slot], features.values[idx]);
    }
}

#[test]
fn empty_input_splits_into_empty_partitions() {
    let parts = split(&FeatureMatrix::default(), 0.2, DEFAULT_SEED).unwrap();

    assert!(parts.train.is_empty());
    assert!(parts.test.is_empty());
    assert!(parts.train_indices.is_empty());
    assert!(parts.test_indices.is_empty());
}

#[rstest]
#[case(0.0)]
#[case(1.0)]
#[case(-0.1)]
#[case(1.5)]
fn out_of_range_fractions_are_rejected(#[case] fraction: f64) {
    let features = FeatureMatrix {
        elapsed_days: vec![0, 1],
        values: vec![1.0, 2.0],
    };

    let result = split(&features, fraction, DEFAULT_SEED);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}
