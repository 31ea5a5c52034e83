use demand_forecast::data::DataLoader;
use demand_forecast::ForecastError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = "\
Date,Product,Sales
2020-01-03,Widget A,30
2020-01-01,Widget A,10
2020-01-02,Widget B,5
2020-01-02,Widget A,20
";

#[test]
fn ingest_sorts_ascending_by_date() {
    let store = DataLoader::from_csv_str(SAMPLE).unwrap();

    let dates: Vec<_> = store.observations().iter().map(|o| o.date).collect();
    for pair in dates.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(store.len(), 4);
    assert_eq!(store.rows_read(), 4);
    assert_eq!(store.rows_dropped(), 0);
}

#[test]
fn ingest_is_idempotent() {
    let first = DataLoader::from_csv_str(SAMPLE).unwrap();
    let second = DataLoader::from_csv_str(SAMPLE).unwrap();

    assert_eq!(first.observations(), second.observations());
}

#[test]
fn unparseable_rows_are_dropped_silently() {
    let csv = "\
Date,Product,Sales
2020-01-01,Widget A,10
not-a-date,Widget A,20
2020-01-03,Widget A,abc
2020-01-04,Widget A,
2020-01-05,Widget A,50
";
    let store = DataLoader::from_csv_str(csv).unwrap();

    assert_eq!(store.rows_read(), 5);
    assert_eq!(store.rows_dropped(), 3);
    assert_eq!(store.len(), 2);
    let values: Vec<_> = store.observations().iter().map(|o| o.value).collect();
    assert_eq!(values, vec![10.0, 50.0]);
}

#[test]
fn negative_values_pass_through() {
    let csv = "Date,Product,Sales\n2020-01-01,Returns,-12.5\n";
    let store = DataLoader::from_csv_str(csv).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.observations()[0].value, -12.5);
}

#[test]
fn missing_sales_column_is_a_schema_error() {
    let csv = "Date,Product\n2020-01-01,Widget A\n";
    let err = DataLoader::from_csv_str(csv).unwrap_err();

    assert!(matches!(err, ForecastError::MissingColumn(ref c) if c == "Sales"));
}

#[test]
fn missing_date_column_is_a_schema_error() {
    let csv = "Product,Sales\nWidget A,10\n";
    let err = DataLoader::from_csv_str(csv).unwrap_err();

    assert!(matches!(err, ForecastError::MissingColumn(ref c) if c == "Date"));
}

#[rstest]
#[case("Date,Product,Sales")]
#[case("date,product,sales")]
#[case("DATE,Entity,Value")]
fn header_matching_accepts_aliases(#[case] header: &str) {
    let csv = format!("{}\n2020-01-01,Widget A,10\n", header);
    let store = DataLoader::from_csv_str(&csv).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.observations()[0].entity, "Widget A");
}

#[rstest]
#[case("2020-01-05")]
#[case("01/05/2020")]
fn both_date_formats_parse(#[case] date: &str) {
    let csv = format!("Date,Product,Sales\n{},Widget A,10\n", date);
    let store = DataLoader::from_csv_str(&csv).unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.observations()[0].date,
        chrono::NaiveDate::from_ymd_opt(2020, 1, 5).unwrap()
    );
}

#[test]
fn entities_in_first_seen_order() {
    let store = DataLoader::from_csv_str(SAMPLE).unwrap();

    // First-seen over the date-sorted rows
    assert_eq!(store.entities(), vec!["Widget A", "Widget B"]);
}

#[test]
fn filter_unknown_entity_yields_empty_series() {
    let store = DataLoader::from_csv_str(SAMPLE).unwrap();
    let series = store.filter("nonexistent");

    assert!(series.is_empty());
    assert_eq!(series.len(), 0);
    assert_eq!(series.values(), Vec::<f64>::new());
}

#[test]
fn filter_returns_only_matching_rows() {
    let store = DataLoader::from_csv_str(SAMPLE).unwrap();
    let series = store.filter("Widget A");

    assert_eq!(series.len(), 3);
    assert_eq!(series.values(), vec![10.0, 20.0, 30.0]);
    assert!(series.observations().iter().all(|o| o.entity == "Widget A"));
}

#[test]
fn load_from_file_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", SAMPLE).unwrap();

    let store = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(store.len(), 4);
}

#[test]
fn missing_file_is_an_io_error() {
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}

#[test]
fn empty_data_section_is_a_valid_store() {
    let store = DataLoader::from_csv_str("Date,Product,Sales\n").unwrap();

    assert!(store.is_empty());
    assert_eq!(store.rows_read(), 0);
    assert!(store.entities().is_empty());
}
