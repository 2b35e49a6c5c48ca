use chrono::NaiveDate;
use report_tracker::loader::{load_feed, FeedError};
use report_tracker::output::{write_csv, write_json, DashboardExport};
use report_tracker::{DashboardState, FilterCriteria};
use std::fs;

const FEED: &str = r#"[
    [1, "HR", "Audit", "Monthly", "2025-05-27"],
    [2, "IT", "Backup", "Weekly", "2025-06-01"],
    [3, "IT"]
]"#;

#[test]
fn loads_feed_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reports.json");
    fs::write(&path, FEED).expect("write feed");

    let (reports, load) = load_feed(&path).expect("load");
    assert_eq!(reports.len(), 2);
    assert_eq!(load.skipped, 1);
}

#[test]
fn missing_feed_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_feed(&dir.path().join("absent.json")).expect_err("missing");
    assert!(matches!(err, FeedError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn exports_filtered_csv_and_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let feed = dir.path().join("reports.json");
    fs::write(&feed, FEED).expect("write feed");
    let (reports, _) = load_feed(&feed).expect("load");

    let today = NaiveDate::from_ymd_opt(2025, 5, 27).expect("date");
    let state = DashboardState::new(reports, today)
        .with_criteria(FilterCriteria::default().with_search("backup"));

    let csv_path = dir.path().join("table.csv");
    write_csv(&csv_path, &state.range_rows()).expect("csv");
    let csv = fs::read_to_string(&csv_path).expect("read csv");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Id,Department,Title,Frequency,DueDate,Status"));
    assert_eq!(lines.next(), Some("2,IT,Backup,Weekly,2025-06-01,Upcoming"));
    assert_eq!(lines.next(), None);

    let json_path = dir.path().join("dashboard.json");
    let view = state.render();
    write_json(&json_path, &DashboardExport::from(&view)).expect("json");
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).expect("read json")).expect("parse");
    assert_eq!(value["kpis"]["totalReports"], serde_json::json!(1));
    assert!(value["kpis"]["dueInPeriod"].is_null());
    assert_eq!(value["events"][0]["id"], serde_json::json!(2));
    assert_eq!(value["events"][0]["allDay"], serde_json::json!(true));
}
