use chrono::NaiveDate;

use crate::status::{classify_with_theme, Theme};
use crate::types::{CalendarEvent, EventProps, Report};
use crate::util::parse_date_strict;

/// Map reports onto all-day calendar events colored by status.
///
/// Reports whose due date does not parse are left out entirely. The event id
/// is the report id so a clicked event can be traced back to its report.
pub fn project(reports: &[&Report], reference: NaiveDate, theme: Theme) -> Vec<CalendarEvent> {
    reports
        .iter()
        .filter_map(|r| {
            let date = parse_date_strict(&r.due_date)?;
            let status = classify_with_theme(&r.due_date, reference, theme);
            Some(CalendarEvent {
                id: r.id.clone(),
                title: r.title.clone(),
                date,
                all_day: true,
                colors: status.event_colors,
                extended_props: EventProps {
                    id: r.id.clone(),
                    department: r.department.clone(),
                    frequency: r.frequency.clone(),
                    status_text: status.label,
                    source_report: (*r).clone(),
                },
            })
        })
        .collect()
}
