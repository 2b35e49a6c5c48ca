// Thin I/O adapter: turns a rendered dashboard into console text and files.
// No filtering or classification happens here.
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use thiserror::Error;

use crate::dashboard::DashboardView;
use crate::types::{CalendarEvent, EventRow, KpiRow, KpiSnapshot, ReportRow};
use crate::util::{format_int, mail_link};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), OutputError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// JSON export payload.
#[derive(Debug, Serialize)]
pub struct DashboardExport<'a> {
    pub kpis: &'a KpiSnapshot,
    pub events: &'a [CalendarEvent],
}

impl<'a> From<&'a DashboardView> for DashboardExport<'a> {
    fn from(view: &'a DashboardView) -> Self {
        DashboardExport { kpis: &view.kpis, events: &view.events }
    }
}

pub fn markdown_table<T>(rows: &[T]) -> String
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows.to_vec()).with(Style::markdown()).to_string()
}

pub fn kpi_rows(kpis: &KpiSnapshot) -> Vec<KpiRow> {
    let row = |metric: &str, value: String| KpiRow { metric: metric.to_string(), value };
    vec![
        row("Total reports", format_int(kpis.total_reports)),
        row("Due in period", kpis.due_in_period.to_string()),
        row("Due today", format_int(kpis.due_today)),
        row("Due within 3 days", format_int(kpis.due_within_3_days)),
        row("Past due", format_int(kpis.past_total)),
    ]
}

/// Render the KPI block and the current page as console text.
pub fn render_dashboard(view: &DashboardView, mail_to: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(err) = &view.error {
        let _ = writeln!(out, "Error: {}", err);
        out.push('\n');
        out.push_str(&markdown_table(&kpi_rows(&view.kpis)));
        out.push('\n');
        return out;
    }

    if view.kpis.show_attention() {
        let _ = writeln!(
            out,
            "(!) {} report(s) due within 3 days need attention",
            format_int(view.kpis.near_notifications)
        );
        out.push('\n');
    }
    out.push_str(&markdown_table(&kpi_rows(&view.kpis)));
    out.push_str("\n\n");

    if let Some(msg) = &view.empty_message {
        let _ = writeln!(out, "{}", msg);
        return out;
    }

    let rows: Vec<ReportRow> = view.rows.iter().map(ReportRow::from).collect();
    out.push_str(&markdown_table(&rows));
    out.push('\n');
    let _ = writeln!(
        out,
        "Page {} of {} ({} matching reports)",
        view.page,
        view.page_count,
        format_int(view.matched)
    );
    if let Some(recipient) = mail_to {
        out.push('\n');
        for entry in &view.rows {
            let _ = writeln!(
                out,
                "{}: {}",
                entry.report.id,
                mail_link(recipient, &entry.report.title)
            );
        }
    }
    out
}

pub fn render_calendar(events: &[CalendarEvent]) -> String {
    let mut rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date));
    markdown_table(&rows)
}
