use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tabled::Tabled;

use crate::status::{EventColors, StatusClassification};

/// Report identifier as it arrives in the feed: a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ReportId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportId::Number(n) => write!(f, "{}", n),
            ReportId::Text(s) => f.write_str(s),
        }
    }
}

/// Untrusted record straight from the feed. Every field is optional and
/// untyped until [`crate::loader::validate_record`] checks it.
#[derive(Debug, Deserialize)]
pub struct RawReport {
    pub id: Option<Value>,
    pub department: Option<Value>,
    pub title: Option<Value>,
    pub frequency: Option<Value>,
    #[serde(rename = "dueDate", alias = "due_date")]
    pub due_date: Option<Value>,
}

/// A validated report. `due_date` is kept verbatim: it may still fail to
/// parse, in which case the report classifies as a date error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub department: String,
    pub title: String,
    pub frequency: String,
    pub due_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(String),
}

impl DepartmentFilter {
    /// `"all"` (any case) or a blank value means no department restriction.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            DepartmentFilter::All
        } else {
            DepartmentFilter::Only(s.to_string())
        }
    }

    pub fn matches(&self, department: &str) -> bool {
        match self {
            DepartmentFilter::All => true,
            DepartmentFilter::Only(d) => d == department,
        }
    }
}

/// Snapshot of the user's filter inputs for one render.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search_term: String,
    pub department: DepartmentFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_department(mut self, department: DepartmentFilter) -> Self {
        self.department = department;
        self
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }
}

/// "Due in period" KPI. Serializes as a number, or `null` when no date range
/// is selected, so an empty range stays distinguishable from no range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum DueInPeriod {
    Count(usize),
    #[default]
    NotApplicable,
}

impl fmt::Display for DueInPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueInPeriod::Count(n) => write!(f, "{}", n),
            DueInPeriod::NotApplicable => f.write_str("n/a"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub total_reports: usize,
    pub due_in_period: DueInPeriod,
    pub due_today: usize,
    pub due_within_3_days: usize,
    pub past_total: usize,
    pub near_notifications: usize,
}

impl KpiSnapshot {
    /// Whether the attention indicator should be lit.
    pub fn show_attention(&self) -> bool {
        self.near_notifications > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventProps {
    pub id: ReportId,
    pub department: String,
    pub frequency: String,
    pub status_text: &'static str,
    pub source_report: Report,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: ReportId,
    pub title: String,
    pub date: NaiveDate,
    pub all_day: bool,
    pub colors: EventColors,
    pub extended_props: EventProps,
}

/// One table row: the report plus its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub report: Report,
    pub status: StatusClassification,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ReportRow {
    #[serde(rename = "Id")]
    #[tabled(rename = "Id")]
    pub id: String,
    #[serde(rename = "Department")]
    #[tabled(rename = "Department")]
    pub department: String,
    #[serde(rename = "Title")]
    #[tabled(rename = "Title")]
    pub title: String,
    #[serde(rename = "Frequency")]
    #[tabled(rename = "Frequency")]
    pub frequency: String,
    #[serde(rename = "DueDate")]
    #[tabled(rename = "DueDate")]
    pub due_date: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&TableEntry> for ReportRow {
    fn from(entry: &TableEntry) -> Self {
        let r = &entry.report;
        ReportRow {
            id: r.id.to_string(),
            department: r.department.clone(),
            title: r.title.clone(),
            frequency: r.frequency.clone(),
            due_date: r.due_date.clone(),
            status: entry.status.label.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct KpiRow {
    #[serde(rename = "Metric")]
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct EventRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Id")]
    #[tabled(rename = "Id")]
    pub id: String,
    #[serde(rename = "Title")]
    #[tabled(rename = "Title")]
    pub title: String,
    #[serde(rename = "Status")]
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&CalendarEvent> for EventRow {
    fn from(event: &CalendarEvent) -> Self {
        EventRow {
            date: event.date.format("%Y-%m-%d").to_string(),
            id: event.id.to_string(),
            title: event.title.clone(),
            status: event.extended_props.status_text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_filter_parses_all() {
        assert_eq!(DepartmentFilter::parse("all"), DepartmentFilter::All);
        assert_eq!(DepartmentFilter::parse(" ALL "), DepartmentFilter::All);
        assert_eq!(DepartmentFilter::parse(""), DepartmentFilter::All);
        assert_eq!(
            DepartmentFilter::parse(" HR "),
            DepartmentFilter::Only("HR".to_string())
        );
    }

    #[test]
    fn department_match_is_exact() {
        let hr = DepartmentFilter::Only("HR".to_string());
        assert!(hr.matches("HR"));
        assert!(!hr.matches("hr"));
        assert!(DepartmentFilter::All.matches("anything"));
    }

    #[test]
    fn due_in_period_serializes_null_when_not_applicable() {
        let na = serde_json::to_value(DueInPeriod::NotApplicable).unwrap();
        assert!(na.is_null());
        let zero = serde_json::to_value(DueInPeriod::Count(0)).unwrap();
        assert_eq!(zero, serde_json::json!(0));
        assert_eq!(DueInPeriod::NotApplicable.to_string(), "n/a");
    }

    #[test]
    fn kpi_snapshot_serializes_camel_case() {
        let kpis = KpiSnapshot { total_reports: 3, due_within_3_days: 2, ..KpiSnapshot::default() };
        let json = serde_json::to_value(kpis).unwrap();
        assert_eq!(json["totalReports"], serde_json::json!(3));
        assert_eq!(json["dueWithin3Days"], serde_json::json!(2));
        assert!(json["dueInPeriod"].is_null());
        assert!(json.get("total_reports").is_none());
    }

    #[test]
    fn report_id_displays_both_forms() {
        assert_eq!(ReportId::Number(42).to_string(), "42");
        assert_eq!(ReportId::Text("R-7".into()).to_string(), "R-7");
    }
}
