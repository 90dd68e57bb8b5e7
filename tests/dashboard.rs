//! End-to-end tests: dataset file on disk → dashboard.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use income_eda::charts::spec::{BarMode, ChartKind, Series};
use income_eda::config::{DashboardConfig, LoadOptions, MissingPolicy};
use income_eda::dashboard::{self, SectionBody};
use income_eda::data::loader::load_file;
use income_eda::{EdaError, LoadError};

const CSV: &str = "\
age,workclass,education,marital-status,occupation,gender,hours-per-week
39,State-gov,Bachelors,Never-married,Adm-clerical,Male,40
50,Self-emp-not-inc,Bachelors,Married-civ-spouse,Exec-managerial,Male,13
38,Private,HS-grad,Divorced,Handlers-cleaners,Male,40
53,Private,11th,Married-civ-spouse,Handlers-cleaners,Male,40
28,Private,Bachelors,Married-civ-spouse,Prof-specialty,Female,40
37,Private,Masters,Married-civ-spouse,Exec-managerial,Female,40
49,Private,9th,Married-spouse-absent,Other-service,Female,16
";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn config_for(path: PathBuf) -> DashboardConfig {
    DashboardConfig {
        data_path: path,
        ..Default::default()
    }
}

#[test]
fn builds_all_sections_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "income.csv", CSV);

    let dash = dashboard::startup(&config_for(path)).unwrap();
    let headings: Vec<&str> = dash.sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(
        headings,
        vec![
            "Dataset Preview",
            "Summary Statistics",
            "Age Distribution",
            "Hours-per-Week Distribution by Occupation",
            "Gender Distribution",
            "Marital Status Distribution",
            "Education Level Distribution",
        ]
    );
    assert_eq!(dash.charts().count(), 5);

    // Preview holds the default five rows; statistics cover the two numeric columns.
    assert_eq!(dash.summary.preview.rows.len(), 5);
    let stats: Vec<&str> = dash
        .summary
        .statistics
        .iter()
        .map(|s| s.column.as_str())
        .collect();
    assert_eq!(stats, vec!["age", "hours-per-week"]);
    assert!(dash.summary.statistics.iter().all(|s| s.count == 7));
}

#[test]
fn charts_follow_the_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "income.csv", CSV);
    let dash = dashboard::startup(&config_for(path)).unwrap();
    let charts: Vec<_> = dash.charts().collect();

    let hours = charts[1];
    assert_eq!(hours.kind, ChartKind::Histogram);
    assert_eq!(hours.layout.bar_mode, Some(BarMode::Overlay));
    let names: Vec<_> = hours.series.iter().filter_map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![
            "Adm-clerical",
            "Exec-managerial",
            "Handlers-cleaners",
            "Prof-specialty",
            "Other-service",
        ]
    );
    assert_eq!(
        hours.series[1],
        Series::Samples {
            name: Some("Exec-managerial".into()),
            values: vec![13.0, 40.0],
        }
    );

    let gender = charts[2];
    assert_eq!(gender.kind, ChartKind::Pie);
    assert_eq!(
        gender.series[0],
        Series::Categories {
            name: None,
            labels: vec!["Male".into(), "Female".into()],
            values: vec![4, 3],
        }
    );

    let marital = charts[3];
    match &marital.series[0] {
        Series::Categories { labels, values, .. } => {
            assert_eq!(labels[0], "Married-civ-spouse");
            assert_eq!(values[0], 4);
            // Single-occurrence ties keep first-seen order.
            assert_eq!(labels[1..], ["Never-married", "Divorced", "Married-spouse-absent"]);
        }
        other => panic!("unexpected series {other:?}"),
    }
}

#[test]
fn preview_of_short_file_returns_all_rows() {
    let dir = tempfile::tempdir().unwrap();
    let short: String = CSV.lines().take(4).map(|l| format!("{l}\n")).collect();
    let path = write_file(dir.path(), "short.csv", &short);
    let dash = dashboard::startup(&config_for(path)).unwrap();
    assert_eq!(dash.summary.preview.rows.len(), 3);
}

#[test]
fn header_only_file_is_empty_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let header = CSV.lines().next().unwrap();
    let path = write_file(dir.path(), "empty.csv", &format!("{header}\n"));
    let err = dashboard::startup(&config_for(path)).unwrap_err();
    assert!(matches!(err, EdaError::EmptyDataset), "{err}");
}

#[test]
fn dropping_age_column_fails_on_age() {
    let dir = tempfile::tempdir().unwrap();
    let without_age: String = CSV
        .lines()
        .map(|line| format!("{}\n", line.split_once(',').unwrap().1))
        .collect();
    let path = write_file(dir.path(), "no_age.csv", &without_age);
    let err = dashboard::startup(&config_for(path)).unwrap_err();
    assert!(matches!(err, EdaError::MissingColumn(ref c) if c == "age"), "{err}");
}

#[test]
fn missing_file_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = dashboard::startup(&config_for(dir.path().join("absent.csv"))).unwrap_err();
    assert!(matches!(err, EdaError::Load(LoadError::NotFound { .. })), "{err}");
}

#[test]
fn unknown_tokens_follow_missing_policy() {
    let dir = tempfile::tempdir().unwrap();
    let with_unknown = CSV.replace("Other-service", "?");
    let path = write_file(dir.path(), "adult.csv", &with_unknown);

    let mut config = config_for(path);
    config.load.extra_na_values = vec!["?".to_string()];
    let dash = dashboard::startup(&config).unwrap();
    let hours = dash.charts().nth(1).unwrap();
    assert_eq!(hours.series.last().unwrap().name(), Some("<null>"));

    config.charts.missing = MissingPolicy::Exclude;
    let dash = dashboard::startup(&config).unwrap();
    let hours = dash.charts().nth(1).unwrap();
    assert_eq!(hours.series.len(), 4);
}

#[test]
fn figures_json_contains_markdown_and_plotly() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "income.csv", CSV);
    let dash = dashboard::startup(&config_for(path)).unwrap();
    let json = dash.to_figures_json();

    assert_eq!(json["title"], dash.title);
    let preview = json["sections"][0]["markdown"].as_str().unwrap();
    assert!(preview.starts_with("|  | age | workclass |"));
    let stats = json["sections"][1]["markdown"].as_str().unwrap();
    assert!(stats.contains("| count | 7 | 7 |"), "{stats}");
    assert_eq!(json["sections"][2]["figure"]["data"][0]["type"], "histogram");
    assert_eq!(
        json["sections"][4]["figure"]["data"][0]["textinfo"],
        "label+percent"
    );
    assert!(matches!(
        dash.sections[1].body,
        SectionBody::Table(ref t) if t.rows.len() == 8
    ));
}

#[test]
fn parquet_json_and_csv_load_alike() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = write_file(
        dir.path(),
        "small.csv",
        "age,gender,occupation\n39,Male,Sales\n50,Female,\n",
    );
    let json_path = write_file(
        dir.path(),
        "small.json",
        r#"[{"age": 39, "gender": "Male", "occupation": "Sales"},
            {"age": 50, "gender": "Female", "occupation": null}]"#,
    );

    let parquet_path = dir.path().join("small.parquet");
    let schema = Arc::new(Schema::new(vec![
        Field::new("age", DataType::Int64, false),
        Field::new("gender", DataType::Utf8, false),
        Field::new("occupation", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![39, 50])) as ArrayRef,
            Arc::new(StringArray::from(vec!["Male", "Female"])) as ArrayRef,
            Arc::new(StringArray::from(vec![Some("Sales"), None])) as ArrayRef,
        ],
    )
    .unwrap();
    let file = std::fs::File::create(&parquet_path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let options = LoadOptions::default();
    let from_csv = load_file(&csv_path, &options).unwrap();
    let from_json = load_file(&json_path, &options).unwrap();
    let from_parquet = load_file(&parquet_path, &options).unwrap();

    assert_eq!(from_csv.column_names(), from_json.column_names());
    assert_eq!(from_csv.column_names(), from_parquet.column_names());
    assert_eq!(from_csv.rows(), from_json.rows());
    assert_eq!(from_csv.rows(), from_parquet.rows());
}

#[test]
fn config_file_drives_startup() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_file(dir.path(), "income.tsv", &CSV.replace(',', "\t"));
    let config_path = write_file(
        dir.path(),
        "eda.json",
        &format!(
            r#"{{ "data_path": {:?}, "summary": {{ "preview_rows": 2, "percentile": "lower" }} }}"#,
            data.display().to_string()
        ),
    );

    let config = DashboardConfig::from_file(&config_path).unwrap();
    let dash = dashboard::startup(&config).unwrap();
    assert_eq!(dash.summary.preview.rows.len(), 2);
    // Lower-method median of seven ages picks an observed value.
    assert_eq!(dash.summary.statistics[0].q50, 39.0);
}
