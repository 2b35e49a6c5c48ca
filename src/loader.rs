use crate::types::{RawReport, Report, ReportId};
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A whole-feed failure: nothing from this load cycle is kept.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("feed is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("feed must be a JSON array of reports, found {0}")]
    NotAnArray(&'static str),
}

/// Why a single record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is neither an array nor an object")]
    Shape,
    #[error("positional record has {0} fields, expected at least 5")]
    TooShort(usize),
    #[error("field `{0}` is missing")]
    Missing(&'static str),
    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_records: usize,
    pub accepted: usize,
    pub skipped: usize,
}

pub fn load_feed(path: &Path) -> Result<(Vec<Report>, LoadReport), FeedError> {
    let text = fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_feed(&text)
}

pub fn parse_feed(text: &str) -> Result<(Vec<Report>, LoadReport), FeedError> {
    let items = match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => items,
        other => return Err(FeedError::NotAnArray(json_kind(&other))),
    };

    let total_records = items.len();
    let mut reports = Vec::with_capacity(total_records);
    let mut skipped = 0usize;
    for (idx, item) in items.into_iter().enumerate() {
        match validate_record(item) {
            Ok(r) => reports.push(r),
            Err(e) => {
                skipped += 1;
                log::debug!("skipping record {}: {}", idx, e);
            }
        }
    }

    let report = LoadReport { total_records, accepted: reports.len(), skipped };
    log::info!(
        "loaded {} reports ({} skipped of {})",
        report.accepted,
        report.skipped,
        report.total_records
    );
    Ok((reports, report))
}

/// Structural validation of one feed entry. Accepts the positional form
/// `[id, department, title, frequency, dueDate, ...]` and the named form.
pub fn validate_record(value: Value) -> Result<Report, RecordError> {
    let raw = match value {
        Value::Array(fields) => {
            if fields.len() < 5 {
                return Err(RecordError::TooShort(fields.len()));
            }
            let mut it = fields.into_iter().map(Some);
            RawReport {
                id: it.next().flatten(),
                department: it.next().flatten(),
                title: it.next().flatten(),
                frequency: it.next().flatten(),
                due_date: it.next().flatten(),
            }
        }
        obj @ Value::Object(_) => {
            serde_json::from_value::<RawReport>(obj).map_err(|_| RecordError::Shape)?
        }
        _ => return Err(RecordError::Shape),
    };
    raw.validate()
}

impl RawReport {
    pub fn validate(self) -> Result<Report, RecordError> {
        let id = match self.id {
            Some(Value::String(s)) => ReportId::Text(s),
            Some(Value::Number(n)) => ReportId::Number(n.as_i64().ok_or(RecordError::WrongType("id"))?),
            Some(Value::Null) | None => return Err(RecordError::Missing("id")),
            Some(_) => return Err(RecordError::WrongType("id")),
        };
        Ok(Report {
            id,
            department: required_str(self.department, "department")?.trim().to_string(),
            title: required_str(self.title, "title")?.trim().to_string(),
            frequency: required_str(self.frequency, "frequency")?,
            due_date: required_str(self.due_date, "dueDate")?,
        })
    }
}

fn required_str(v: Option<Value>, field: &'static str) -> Result<String, RecordError> {
    match v {
        Some(Value::String(s)) => Ok(s),
        Some(Value::Null) | None => Err(RecordError::Missing(field)),
        Some(_) => Err(RecordError::WrongType(field)),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Department names across the loaded reports, sorted and de-duplicated.
pub fn departments(reports: &[Report]) -> Vec<String> {
    let mut names: Vec<String> = reports
        .iter()
        .map(|r| r.department.clone())
        .filter(|d| !d.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_positional_and_named_records() {
        let text = r#"[
            [1, "HR", "Audit", "Monthly", "2025-05-27"],
            ["R-2", "IT", "Backup", "Weekly", "2025-06-01", "extra"],
            {"id": 3, "department": "Finance", "title": "Close", "frequency": "Monthly", "dueDate": "2025-06-30"},
            {"id": "4", "department": "Ops", "title": "Review", "frequency": "Yearly", "due_date": "2025-12-31"}
        ]"#;
        let (reports, load) = parse_feed(text).unwrap();
        assert_eq!(load, LoadReport { total_records: 4, accepted: 4, skipped: 0 });
        assert_eq!(reports[0].id, ReportId::Number(1));
        assert_eq!(reports[1].id, ReportId::Text("R-2".into()));
        assert_eq!(reports[2].due_date, "2025-06-30");
        assert_eq!(reports[3].due_date, "2025-12-31");
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let text = r#"[
            [1, "HR", "Audit", "Monthly"],
            [2, 7, "Audit", "Monthly", "2025-05-27"],
            [3, "HR", null, "Monthly", "2025-05-27"],
            "just a string",
            {"id": 4, "department": "HR"},
            [5, "HR", "Kept", "Monthly", "2025-13-40"]
        ]"#;
        let (reports, load) = parse_feed(text).unwrap();
        assert_eq!(load.total_records, 6);
        assert_eq!(load.skipped, 5);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].title, "Kept");
    }

    #[test]
    fn record_errors_name_the_field() {
        assert_eq!(
            validate_record(json!([1, "HR", 5, "Monthly", "2025-01-01"])),
            Err(RecordError::WrongType("title"))
        );
        assert_eq!(
            validate_record(json!({"department": "HR", "title": "A", "frequency": "M", "dueDate": "x"})),
            Err(RecordError::Missing("id"))
        );
        assert_eq!(validate_record(json!([1, 2])), Err(RecordError::TooShort(2)));
        assert_eq!(validate_record(json!(true)), Err(RecordError::Shape));
        assert_eq!(
            validate_record(json!([1.5, "HR", "A", "M", "2025-01-01"])),
            Err(RecordError::WrongType("id"))
        );
    }

    #[test]
    fn non_array_feed_is_an_error() {
        assert!(matches!(parse_feed(r#"{"reports": []}"#), Err(FeedError::NotAnArray("an object"))));
        assert!(matches!(parse_feed("not json"), Err(FeedError::Parse(_))));
    }

    #[test]
    fn departments_are_sorted_and_unique() {
        let (reports, _) = parse_feed(
            r#"[[1,"IT","a","M","2025-01-01"],[2,"HR","b","M","2025-01-01"],[3,"IT","c","M","2025-01-01"]]"#,
        )
        .unwrap();
        assert_eq!(departments(&reports), vec!["HR".to_string(), "IT".to_string()]);
    }
}
