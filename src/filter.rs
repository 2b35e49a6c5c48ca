// Two-stage filtering: search + department first, then the date range.
//
// The stages are kept separate because the KPIs read both views: totals and
// past-due counts come from the base view, period counts from the range view.
use crate::types::{FilterCriteria, Report};
use crate::util::{contains_ci, parse_date_strict};

/// Keep reports in the selected department whose department or title
/// contains the search term (case-insensitive). Order is preserved.
pub fn apply_base_filter<'a>(reports: &'a [Report], criteria: &FilterCriteria) -> Vec<&'a Report> {
    let term = criteria.search_term.trim();
    reports
        .iter()
        .filter(|r| criteria.department.matches(&r.department))
        .filter(|r| contains_ci(&r.department, term) || contains_ci(&r.title, term))
        .collect()
}

/// Narrow the base view to the selected date range, both ends inclusive.
///
/// With no bound set this is a pass-through, so reports with an unparseable
/// due date stay visible in the table. Once a bound is set they are dropped.
pub fn apply_date_range_filter<'a>(base: &[&'a Report], criteria: &FilterCriteria) -> Vec<&'a Report> {
    if !criteria.has_date_range() {
        return base.to_vec();
    }
    base.iter()
        .copied()
        .filter(|r| match parse_date_strict(&r.due_date) {
            Some(due) => {
                criteria.start_date.map_or(true, |start| due >= start)
                    && criteria.end_date.map_or(true, |end| due <= end)
            }
            None => false,
        })
        .collect()
}

/// Both filtered views, rebuilt from scratch on every change.
/// Invariant: `range ⊆ base ⊆ reports`, order-preserving.
#[derive(Debug, Clone)]
pub struct FilteredViews<'a> {
    pub base: Vec<&'a Report>,
    pub range: Vec<&'a Report>,
}

impl<'a> FilteredViews<'a> {
    pub fn build(reports: &'a [Report], criteria: &FilterCriteria) -> Self {
        let base = apply_base_filter(reports, criteria);
        let range = apply_date_range_filter(&base, criteria);
        FilteredViews { base, range }
    }
}
