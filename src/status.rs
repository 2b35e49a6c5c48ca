// Temporal status of a report relative to a reference date.
//
// Classification is date-only: both sides are calendar days, so there is no
// time-of-day or timezone to strip. Everything here is pure and total.
use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::util::parse_date_strict;

/// Days after the reference date still counted as "near" (inclusive).
pub const NEAR_HORIZON_DAYS: i64 = 3;

/// Source of the reference date. Tests pin it with [`FixedClock`].
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Past,
    DueToday,
    UpcomingNear,
    Future,
    /// The due date is not a valid `YYYY-MM-DD` calendar day.
    Invalid,
}

/// Styling tag used by the table renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableClass {
    #[serde(rename = "status-past")]
    Past,
    #[serde(rename = "status-today")]
    Today,
    #[serde(rename = "status-near")]
    Near,
    #[serde(rename = "status-future")]
    Future,
    #[serde(rename = "status-error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventColors {
    pub background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

const fn colors(background: &'static str, border: &'static str, text: &'static str) -> EventColors {
    EventColors { background, border, text }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme `{0}` (expected `light` or `dark`)")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl Theme {
    /// Resolve a theme name, falling back to [`Theme::Light`] when the name
    /// is missing or unknown.
    pub fn resolve(name: Option<&str>) -> Theme {
        match name.map(str::parse::<Theme>) {
            None => Theme::default(),
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                log::warn!("{}; using light theme", e);
                Theme::default()
            }
        }
    }

    /// Calendar colors for a status under this theme.
    pub fn colors(self, status: Status) -> EventColors {
        match (self, status) {
            (Theme::Light, Status::Past) => colors("#f8d7da", "#dc3545", "#842029"),
            (Theme::Light, Status::DueToday) => colors("#ffe5d0", "#fd7e14", "#7a3e09"),
            (Theme::Light, Status::UpcomingNear) => colors("#fff3cd", "#ffc107", "#664d03"),
            (Theme::Light, Status::Future) => colors("#d1e7dd", "#198754", "#0f5132"),
            (Theme::Light, Status::Invalid) => colors("#e9ecef", "#adb5bd", "#495057"),
            (Theme::Dark, Status::Past) => colors("#2c0b0e", "#ea868f", "#f1aeb5"),
            (Theme::Dark, Status::DueToday) => colors("#331904", "#feb272", "#fecba1"),
            (Theme::Dark, Status::UpcomingNear) => colors("#332701", "#ffda6a", "#ffe69c"),
            (Theme::Dark, Status::Future) => colors("#051b11", "#75b798", "#a3cfbb"),
            (Theme::Dark, Status::Invalid) => colors("#2b3035", "#6c757d", "#adb5bd"),
        }
    }
}

/// Derived, never stored: recompute from `(due_date, reference_date)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusClassification {
    pub status: Status,
    pub label: &'static str,
    pub table_class: TableClass,
    pub is_past: bool,
    pub is_near: bool,
    pub event_colors: EventColors,
}

impl StatusClassification {
    fn of(status: Status, theme: Theme) -> Self {
        let (label, table_class) = match status {
            Status::Past => ("Past due", TableClass::Past),
            Status::DueToday => ("Due today", TableClass::Today),
            Status::UpcomingNear => ("Due soon", TableClass::Near),
            Status::Future => ("Upcoming", TableClass::Future),
            Status::Invalid => ("date error", TableClass::Error),
        };
        StatusClassification {
            status,
            label,
            table_class,
            is_past: status == Status::Past,
            is_near: matches!(status, Status::DueToday | Status::UpcomingNear),
            event_colors: theme.colors(status),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Invalid
    }
}

/// Classify a due date against `reference` using the light palette.
pub fn classify(due_date: &str, reference: NaiveDate) -> StatusClassification {
    classify_with_theme(due_date, reference, Theme::Light)
}

pub fn classify_with_theme(due_date: &str, reference: NaiveDate, theme: Theme) -> StatusClassification {
    let status = match parse_date_strict(due_date) {
        Some(due) => status_of(due, reference),
        None => Status::Invalid,
    };
    StatusClassification::of(status, theme)
}

/// First match wins: past, today, within the near horizon, otherwise future.
pub fn status_of(due: NaiveDate, reference: NaiveDate) -> Status {
    let horizon = reference
        .checked_add_signed(Duration::days(NEAR_HORIZON_DAYS))
        .unwrap_or(NaiveDate::MAX);
    if due < reference {
        Status::Past
    } else if due == reference {
        Status::DueToday
    } else if due <= horizon {
        Status::UpcomingNear
    } else {
        Status::Future
    }
}
