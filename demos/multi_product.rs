use chrono::NaiveDate;
use demand_forecast::models::Method;
use demand_forecast::pipeline::{run_forecast, ForecastRequest};
use demand_forecast::synthetic::{self, ProductProfile};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Multi-Product Example");
    println!("======================================\n");

    // A small catalog with different demand shapes
    println!("Generating sample sales history...");
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let profiles = vec![
        ProductProfile {
            name: "Laptop".to_string(),
            base: 120.0,
            daily_trend: 0.8,
            noise_std: 6.0,
            weekend_uplift: 20.0,
        },
        ProductProfile::new("Keyboard", 45.0, -0.2),
        ProductProfile::new("Monitor", 80.0, 0.0),
    ];
    let csv = synthetic::to_csv_string(&synthetic::generate(start, 120, &profiles, 7)?);
    println!("Sample data created: 3 products, 120 days each\n");

    // Forecast every product with a different model
    let requests = vec![
        ForecastRequest::new("Laptop", Method::LinearTrend, 14),
        ForecastRequest::new("Keyboard", Method::MovingAverage { window: 7 }, 14),
        ForecastRequest::new("Monitor", Method::TrailingMean, 14),
    ];

    for request in &requests {
        let report = run_forecast(csv.as_bytes(), request)?;

        println!("{} ({})", report.entity, report.model);
        match &report.metrics {
            Some(m) => println!("  held-out RMSE: {:.2}", m.rmse),
            None => println!("  held-out RMSE: n/a (series too short)"),
        }
        let values = report.forecast.values();
        println!(
            "  next 14 days: {:.2} .. {:.2}",
            values.first().unwrap(),
            values.last().unwrap()
        );
    }

    // A miss stays a displayable error rather than a panic
    let bad = ForecastRequest::new("Headphones", Method::TrailingMean, 7);
    if let Err(err) = run_forecast(csv.as_bytes(), &bad) {
        println!("\nExpected failure: {}", err);
    }

    Ok(())
}
