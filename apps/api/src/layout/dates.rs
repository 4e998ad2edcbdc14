//! "Month YYYY" formatting for experience and education date ranges.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::layout::labels::Labels;

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // <input type="month"> values
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    // A bare year reads as January of that year.
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        return raw.parse::<i32>().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    None
}

/// Formats one date as "Month YYYY".
///
/// Absent or blank input gives an empty string; anything unparseable gives
/// the `invalid_date` literal instead of failing.
pub fn format_month_year(raw: Option<&str>, labels: &Labels) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return String::new();
    };
    match parse_date(raw) {
        Some(date) => format!("{} {}", labels.months[date.month0() as usize], date.year()),
        None => labels.invalid_date.clone(),
    }
}

/// Formats the "start – end" line of an entry.
///
/// `end` must already account for the ongoing flag: callers pass `None` for
/// ongoing entries and set `ongoing` so the "Present" literal is shown.
pub fn format_date_range(
    start: Option<&str>,
    end: Option<&str>,
    ongoing: bool,
    labels: &Labels,
) -> String {
    let start = format_month_year(start, labels);
    let end = if ongoing {
        labels.present.clone()
    } else {
        format_month_year(end, labels)
    };

    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start,
        (true, false) => end,
        (false, false) => format!("{start} – {end}"),
    }
}
