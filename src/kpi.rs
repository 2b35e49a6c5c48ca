// KPI counters for the dashboard header.
//
// Period counters (due today, within 3 days, due in period) read the range
// view. Past-due and the attention count read the base view so they do not
// move when only the date range changes.
use chrono::NaiveDate;

use crate::status::{classify, Status};
use crate::types::{DueInPeriod, KpiSnapshot, Report};

pub fn aggregate(
    base: &[&Report],
    range: &[&Report],
    reference: NaiveDate,
    has_explicit_range: bool,
) -> KpiSnapshot {
    let mut due_today = 0usize;
    let mut upcoming_near = 0usize;
    for r in range {
        match classify(&r.due_date, reference).status {
            Status::DueToday => due_today += 1,
            Status::UpcomingNear => upcoming_near += 1,
            _ => {}
        }
    }

    let mut past_total = 0usize;
    let mut near_notifications = 0usize;
    for r in base {
        let c = classify(&r.due_date, reference);
        if c.is_past {
            past_total += 1;
        }
        if c.is_near {
            near_notifications += 1;
        }
    }

    KpiSnapshot {
        total_reports: base.len(),
        due_in_period: if has_explicit_range {
            DueInPeriod::Count(range.len())
        } else {
            DueInPeriod::NotApplicable
        },
        due_today,
        // "Within 3 days" includes today.
        due_within_3_days: due_today + upcoming_near,
        past_total,
        near_notifications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilteredViews;
    use crate::types::{FilterCriteria, ReportId};

    fn report(id: i64, due: &str) -> Report {
        Report {
            id: ReportId::Number(id),
            department: "Ops".to_string(),
            title: format!("Report {}", id),
            frequency: "Weekly".to_string(),
            due_date: due.to_string(),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn counts_over_full_set() {
        let reports = vec![
            report(1, "2025-05-20"),
            report(2, "2025-05-27"),
            report(3, "2025-05-27"),
            report(4, "2025-05-29"),
            report(5, "2025-06-30"),
            report(6, "2025-13-40"),
        ];
        let views = FilteredViews::build(&reports, &FilterCriteria::default());
        let k = aggregate(&views.base, &views.range, d(2025, 5, 27), false);
        assert_eq!(k.total_reports, 6);
        assert_eq!(k.due_in_period, DueInPeriod::NotApplicable);
        assert_eq!(k.due_today, 2);
        assert_eq!(k.due_within_3_days, 3);
        assert_eq!(k.past_total, 1);
        assert_eq!(k.near_notifications, 3);
        assert!(k.show_attention());
    }

    #[test]
    fn past_total_ignores_date_range() {
        let reports = vec![report(1, "2025-05-01"), report(2, "2025-06-10")];
        let criteria = FilterCriteria::default().with_range(Some(d(2025, 6, 1)), None);
        let views = FilteredViews::build(&reports, &criteria);
        let k = aggregate(&views.base, &views.range, d(2025, 5, 27), true);
        assert_eq!(k.due_in_period, DueInPeriod::Count(1));
        assert_eq!(k.past_total, 1);
        assert!(!k.show_attention());
    }

    #[test]
    fn empty_range_is_zero_not_not_applicable() {
        let reports = vec![report(1, "2025-05-01")];
        let criteria = FilterCriteria::default().with_range(Some(d(2030, 1, 1)), None);
        let views = FilteredViews::build(&reports, &criteria);
        let k = aggregate(&views.base, &views.range, d(2025, 5, 27), true);
        assert_eq!(k.due_in_period, DueInPeriod::Count(0));
    }
}
