use chrono::NaiveDate;
use demand_forecast::models::Method;
use demand_forecast::pipeline::Loaded;
use demand_forecast::synthetic::{self, ProductProfile};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Basic Forecasting Example");
    println!("==========================================\n");

    // Create sample data
    println!("Generating sample sales history...");
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let profiles = vec![ProductProfile::new("Widget A", 100.0, 1.5)];
    let csv = synthetic::to_csv_string(&synthetic::generate(start, 90, &profiles, 42)?);
    println!("Sample data created: 90 daily rows\n");

    // Walk the pipeline stage by stage
    println!("Loading and preparing data...");
    let loaded = Loaded::from_csv_str(&csv)?;
    println!("Products found: {:?}", loaded.entities());

    let split = loaded.select("Widget A")?.split_default()?;
    println!(
        "Split: {} training rows, {} held-out rows\n",
        split.partition().train.len(),
        split.partition().test.len()
    );

    // Fit a linear trend and inspect it
    println!("Fitting a linear trend...");
    let trained = split.train(Method::LinearTrend)?;
    println!("Model: {}\n", trained.model().name());

    let metrics = trained.evaluate()?;
    println!("{}\n", metrics);

    // Forecast the next week
    let forecast = trained.forecast(7)?;
    println!("Forecast (next 7 days):");
    for point in forecast.points() {
        println!(
            "  day +{}: {:.2} units",
            point.days_ahead, point.predicted_value
        );
    }

    // Chart payload for a plotting frontend
    let chart = trained.chart(&forecast);
    println!(
        "\nChart series: \"{}\" ({} points), \"{}\" ({} points)",
        chart[0].name,
        chart[0].points.len(),
        chart[1].name,
        chart[1].points.len()
    );

    Ok(())
}
