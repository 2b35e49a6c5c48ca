use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use thiserror::Error;

use crate::status::{Clock, Theme};
use crate::types::{DepartmentFilter, FilterCriteria};
use crate::util::parse_date_safe;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {flag} date `{value}` (expected YYYY-MM-DD)")]
    BadDate { flag: &'static str, value: String },
}

#[derive(Debug, Parser)]
#[command(name = "report_tracker")]
#[command(about = "Track recurring reports by due date")]
pub struct Cli {
    /// JSON feed of reports.
    #[arg(long, default_value = "reports.json")]
    pub feed: PathBuf,
    /// Reference date used instead of the local date.
    #[arg(long)]
    pub today: Option<String>,
    #[arg(long, default_value = "all")]
    pub department: String,
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long)]
    pub theme: Option<String>,
    /// Recipient for the per-report mail links.
    #[arg(long)]
    pub mail_to: Option<String>,
    #[arg(long)]
    pub export_csv: Option<PathBuf>,
    #[arg(long)]
    pub export_json: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub calendar: bool,
    #[arg(long, default_value_t = false)]
    pub interactive: bool,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn criteria(&self) -> Result<FilterCriteria, ConfigError> {
        Ok(FilterCriteria::default()
            .with_search(self.search.trim())
            .with_department(DepartmentFilter::parse(&self.department))
            .with_range(
                optional_date("--start", self.start.as_deref())?,
                optional_date("--end", self.end.as_deref())?,
            ))
    }

    pub fn reference_date(&self, clock: &dyn Clock) -> Result<NaiveDate, ConfigError> {
        Ok(optional_date("--today", self.today.as_deref())?.unwrap_or_else(|| clock.today()))
    }

    pub fn theme(&self) -> Theme {
        Theme::resolve(self.theme.as_deref())
    }
}

/// Parse an optional date flag. A blank value counts as not given.
pub fn optional_date(flag: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, ConfigError> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => parse_date_safe(Some(v))
            .map(Some)
            .ok_or_else(|| ConfigError::BadDate { flag, value: v.to_string() }),
    }
}

/// Initialise `env_logger`. `RUST_LOG` wins; otherwise `-v` raises the
/// default `warn` level to `info`, `-vv` to `debug`.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}
