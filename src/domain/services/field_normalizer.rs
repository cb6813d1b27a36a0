//! Per-field parsers for the raw text the flat file stores.
//!
//! Every parser turns an unparseable cell into `None`, never into an
//! error and never into a misleading concrete value like 0. Downstream
//! aggregates exclude missing values instead of counting them.

use chrono::NaiveDate;

/// Dates in the file are day-first.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a locale-formatted 0–10 rating ("7,5" style comma decimals).
pub fn parse_rating(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
}

pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub fn parse_duration(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Format a 0–10 rating back into the file's comma-decimal convention.
pub fn format_rating(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        // One decimal is all the source scale ever carries
        format!("{:.1}", value).replace('.', ",")
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
