use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::core::error::AppError;
use crate::shared::constants::DATE_FORMAT;

/// Parse a calendar date from a query value.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 date-time, or a naive `YYYY-MM-DDTHH:MM:SS`
/// date-time; for date-times only the calendar date is kept.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Validate an optional date query parameter.
///
/// Blank values are treated as absent. Anything else must parse as a date or
/// the request is rejected with a message naming `name`.
pub fn parse_date_param(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_calendar_date(raw).map(Some).ok_or_else(|| {
            AppError::Validation(format!(
                "Query parameter '{}' should be a valid date string.",
                name
            ))
        }),
    }
}
