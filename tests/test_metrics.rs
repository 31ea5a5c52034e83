use assert_approx_eq::assert_approx_eq;
use demand_forecast::metrics::{evaluate, mae, mse, rmse};
use demand_forecast::ForecastError;

#[test]
fn mae_averages_absolute_errors() {
    let actual = vec![10.0, 20.0, 30.0];
    let predicted = vec![12.0, 18.0, 30.0];

    assert_approx_eq!(mae(&actual, &predicted).unwrap(), 4.0 / 3.0);
}

#[test]
fn mse_averages_squared_errors() {
    let actual = vec![10.0, 20.0, 30.0];
    let predicted = vec![10.0, 20.0, 33.0];

    assert_approx_eq!(mse(&actual, &predicted).unwrap(), 3.0);
}

#[test]
fn rmse_is_the_square_root_of_mse() {
    let actual = vec![1.0, 5.0, 9.0, 2.0];
    let predicted = vec![1.5, 4.0, 9.5, 3.0];

    let metrics = evaluate(&actual, &predicted).unwrap();
    assert_approx_eq!(metrics.rmse * metrics.rmse, metrics.mse);
    assert_approx_eq!(rmse(&actual, &predicted).unwrap(), metrics.rmse);
}

#[test]
fn perfect_forecast_scores_zero() {
    let actual = vec![4.0, 5.0, 6.0];

    let metrics = evaluate(&actual, &actual).unwrap();
    assert_approx_eq!(metrics.mae, 0.0);
    assert_approx_eq!(metrics.mse, 0.0);
    assert_approx_eq!(metrics.rmse, 0.0);
}

#[test]
fn length_mismatch_is_a_shape_error() {
    let actual = vec![1.0, 2.0, 3.0];
    let predicted = vec![1.0, 2.0];

    let err = evaluate(&actual, &predicted).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::ShapeMismatch {
            actual: 3,
            predicted: 2
        }
    ));
}

#[test]
fn empty_sequences_are_rejected() {
    let result = evaluate(&[], &[]);
    assert!(matches!(
        result,
        Err(ForecastError::InsufficientData { needed: 1, got: 0 })
    ));
}

#[test]
fn metrics_display_is_presentable() {
    let metrics = evaluate(&[10.0, 20.0], &[11.0, 19.0]).unwrap();
    let text = format!("{}", metrics);

    assert!(text.contains("MAE"));
    assert!(text.contains("MSE"));
    assert!(text.contains("RMSE"));
}
