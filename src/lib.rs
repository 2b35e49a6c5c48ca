//! Report-tracking dashboard core.
//!
//! A report list is loaded once per cycle, then every render runs the same
//! pipeline: search/department filter, date-range filter, and from those two
//! views the table page, the KPI counters and the calendar events.
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod kpi;
pub mod loader;
pub mod output;
pub mod paginate;
pub mod status;
pub mod types;
pub mod util;

pub use dashboard::{DashboardState, DashboardView};
pub use status::{classify, Status, StatusClassification, Theme};
pub use types::{CalendarEvent, DepartmentFilter, DueInPeriod, FilterCriteria, KpiSnapshot, Report, ReportId};
