// Utility helpers for parsing, matching and formatting.
//
// This module centralizes the "dirty" string and date handling so the rest
// of the code can assume clean, typed values.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"));

/// Parse a due date in strict `YYYY-MM-DD` form.
///
/// The string must be exactly four digits, two digits and two digits joined
/// by dashes, and it must name a real calendar day. No trimming is done:
/// `" 2025-05-27"` is rejected just like `"2025-13-40"`.
pub fn parse_date_strict(s: &str) -> Option<NaiveDate> {
    if !DATE_RE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Forgiving variant for user-typed input: trims whitespace and treats an
/// empty value as missing.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    parse_date_strict(s)
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Build the mail-composition link used by the detail view of a report.
///
/// The subject is `Report: <title>`, percent-encoded with `%20` for spaces so
/// mail clients do not show literal `+` signs.
pub fn mail_link(recipient: &str, title: &str) -> String {
    let subject = format!("Report: {}", title);
    let encoded: String = url::form_urlencoded::byte_serialize(subject.as_bytes()).collect();
    // byte_serialize escapes a literal '+' as %2B, so every '+' left is a space.
    format!("mailto:{}?subject={}", recipient.trim(), encoded.replace('+', "%20"))
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for counts shown in the console
    // (e.g., `1,204 reports loaded`).
    n.to_formatted_string(&Locale::en)
}
