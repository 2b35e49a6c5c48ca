// Dashboard orchestration.
//
// `DashboardState` is an immutable snapshot of everything a render depends
// on. Each trigger (reload, filter change, page navigation, new reference
// date or theme) returns a new state, and `render` rebuilds every view from
// the full report list in one pass.
use chrono::NaiveDate;
use std::sync::Arc;

use crate::calendar;
use crate::filter::FilteredViews;
use crate::kpi;
use crate::loader::{self, FeedError};
use crate::paginate::{clamp_page, page, page_count, PAGE_SIZE};
use crate::status::{classify_with_theme, Theme};
use crate::types::{CalendarEvent, FilterCriteria, KpiSnapshot, Report, ReportRow, TableEntry};

pub const EMPTY_FEED_MESSAGE: &str = "No reports found.";
pub const NO_MATCH_MESSAGE: &str = "No reports match the current filters.";

#[derive(Debug, Clone)]
pub struct DashboardState {
    reports: Arc<[Report]>,
    criteria: FilterCriteria,
    reference_date: NaiveDate,
    page: usize,
    theme: Theme,
}

/// Fully computed, read-only output of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub rows: Vec<TableEntry>,
    pub page: usize,
    pub page_count: usize,
    pub matched: usize,
    pub kpis: KpiSnapshot,
    pub events: Vec<CalendarEvent>,
    pub departments: Vec<String>,
    pub empty_message: Option<String>,
    pub error: Option<String>,
}

impl DashboardView {
    /// View for a failed feed load: the message only, KPIs reset, no data.
    pub fn failed(message: impl Into<String>) -> Self {
        DashboardView {
            rows: Vec::new(),
            page: 1,
            page_count: 0,
            matched: 0,
            kpis: KpiSnapshot::default(),
            events: Vec::new(),
            departments: Vec::new(),
            empty_message: None,
            error: Some(message.into()),
        }
    }
}

impl DashboardState {
    pub fn new(reports: Vec<Report>, reference_date: NaiveDate) -> Self {
        DashboardState {
            reports: reports.into(),
            criteria: FilterCriteria::default(),
            reference_date,
            page: 1,
            theme: Theme::default(),
        }
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Replace the report list wholesale and go back to page 1.
    pub fn with_reports(self, reports: Vec<Report>) -> Self {
        DashboardState { reports: reports.into(), page: 1, ..self }
    }

    /// Apply the outcome of a feed load. A failure keeps nothing from earlier
    /// loads: the report list is emptied and the returned view carries the
    /// error message.
    pub fn with_load_result(self, result: Result<Vec<Report>, FeedError>) -> (Self, Option<DashboardView>) {
        match result {
            Ok(reports) => (self.with_reports(reports), None),
            Err(e) => {
                log::error!("feed load failed: {}", e);
                let view = DashboardView::failed(format!("Failed to load reports: {}", e));
                (self.with_reports(Vec::new()), Some(view))
            }
        }
    }

    /// New filter snapshot; the page resets so a shrinking result set never
    /// leaves the table on an empty page.
    pub fn with_criteria(self, criteria: FilterCriteria) -> Self {
        DashboardState { criteria, page: 1, ..self }
    }

    pub fn with_reference_date(self, reference_date: NaiveDate) -> Self {
        DashboardState { reference_date, ..self }
    }

    pub fn with_theme(self, theme: Theme) -> Self {
        DashboardState { theme, ..self }
    }

    pub fn with_page(self, requested: usize) -> Self {
        let matched = self.views().range.len();
        let page = clamp_page(requested, matched, PAGE_SIZE);
        DashboardState { page, ..self }
    }

    pub fn next_page(self) -> Self {
        let requested = self.page.saturating_add(1);
        self.with_page(requested)
    }

    pub fn previous_page(self) -> Self {
        let requested = self.page.saturating_sub(1);
        self.with_page(requested)
    }

    fn views(&self) -> FilteredViews<'_> {
        FilteredViews::build(&self.reports, &self.criteria)
    }

    /// Every row of the range view, for export.
    pub fn range_rows(&self) -> Vec<ReportRow> {
        self.views()
            .range
            .iter()
            .map(|r| ReportRow::from(&self.entry(r)))
            .collect()
    }

    fn entry(&self, report: &Report) -> TableEntry {
        TableEntry {
            report: report.clone(),
            status: classify_with_theme(&report.due_date, self.reference_date, self.theme),
        }
    }

    pub fn render(&self) -> DashboardView {
        let views = self.views();
        let kpis = kpi::aggregate(
            &views.base,
            &views.range,
            self.reference_date,
            self.criteria.has_date_range(),
        );
        let rows: Vec<TableEntry> = page(&views.range, self.page, PAGE_SIZE)
            .iter()
            .map(|r| self.entry(r))
            .collect();
        let events = calendar::project(&views.range, self.reference_date, self.theme);

        let empty_message = if self.reports.is_empty() {
            Some(EMPTY_FEED_MESSAGE.to_string())
        } else if views.range.is_empty() {
            Some(NO_MATCH_MESSAGE.to_string())
        } else {
            None
        };

        DashboardView {
            rows,
            page: self.page,
            page_count: page_count(views.range.len(), PAGE_SIZE),
            matched: views.range.len(),
            kpis,
            events,
            departments: loader::departments(&self.reports),
            empty_message,
            error: None,
        }
    }
}
