// Utility helpers for header normalization, parsing and number formatting.
//
// This module centralizes all the "dirty" CSV/number/date handling so the
// rest of the code can assume clean, typed values.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Date-only layouts tried in order by [`parse_date_safe`].
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Date-time layouts; only the calendar date is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Normalize a CSV header so that `" Media  Type "` and `"mediatype"` match.
///
/// Trims, lowercases, then drops every whitespace character left inside the
/// name. Applying it twice yields the same result as applying it once.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Parse a calendar date, accepting the handful of layouts that show up in
/// social listening exports.
///
/// - Accepts `Option<&str>` so callers can pass through missing fields.
/// - Returns `None` for anything that cannot be parsed; the caller drops
///   the row rather than defaulting it.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(d);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }
    // Offset-aware timestamps keep the date as written, in their own offset.
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Parse an engagement count while being forgiving about formatting issues
/// that are common in CSV exports (thousands separators, spaces, decimals).
///
/// Unparseable, negative or non-finite values yield `None`; the loader turns
/// that into 0 and keeps the row. Fractions are truncated.
pub fn parse_engagements(s: Option<&str>) -> Option<u64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replace(',', "");
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    if !f.is_finite() || f < 0.0 {
        return None;
    }
    // `as` saturates at u64::MAX for very large floats.
    Some(f.trunc() as u64)
}

/// Format a date the way insight texts show it, e.g. `Jan 05, 2024`.
pub fn format_insight_date(d: NaiveDate) -> String {
    d.format("%b %d, %Y").to_string()
}

/// Percentage of `part` in `total` with one decimal place (`"50.0"`).
///
/// A zero total renders as `"0.0"` instead of `NaN`.
pub fn format_percent(part: u64, total: u64) -> String {
    if total == 0 {
        return format_number(0.0, 1);
    }
    format_number(part as f64 / total as f64 * 100.0, 1)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals; the integer part gets thousands separators.
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let int_val: u64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = parts.next() {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values.
    n.to_formatted_string(&Locale::en)
}
