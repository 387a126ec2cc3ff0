use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::domain::RelativeDay;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDateInput(String),
}

pub trait LocalExt {
    fn current_date() -> NaiveDate;
}

impl LocalExt for Local {
    fn current_date() -> NaiveDate {
        Self::now().date_naive()
    }
}

/// Parse an event date.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time of day
/// (`YYYY-MM-DDTHH:MM[:SS[.fff]]`, optionally with a `Z` or `±HH:MM`
/// offset). The time is dropped and the calendar date is kept as written,
/// without any timezone conversion.
pub fn parse_event_date(date_str: &str) -> Result<NaiveDate, DateError> {
    let invalid = || DateError::InvalidDateInput(date_str.to_string());
    let trimmed = date_str.trim();

    let date_part = trimmed
        .as_bytes()
        .get(..10)
        .filter(|bytes| is_iso_date_shape(bytes))
        .ok_or_else(invalid)?;
    // Safe to slice: the first 10 bytes were checked to be ASCII
    let date = NaiveDate::parse_from_str(&trimmed[..date_part.len()], "%Y-%m-%d")
        .map_err(|_| invalid())?;

    if trimmed.len() == date_part.len() {
        return Ok(date);
    }

    let has_valid_time = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .is_ok()
        || NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M").is_ok()
        || DateTime::parse_from_rfc3339(trimmed).is_ok()
        || with_seconds(trimmed).is_some_and(|t| DateTime::parse_from_rfc3339(&t).is_ok());
    if has_valid_time {
        Ok(date)
    } else {
        Err(invalid())
    }
}

/// "2023-06-15T18:30Z" -> "2023-06-15T18:30:00Z", so a minute-only time
/// with an offset can go through the RFC 3339 parser.
fn with_seconds(s: &str) -> Option<String> {
    let (date_time, offset) = (s.get(..16)?, s.get(16..)?);
    if offset.starts_with(':') {
        return None;
    }
    Some(format!("{}:00{}", date_time, offset))
}

fn is_iso_date_shape(bytes: &[u8]) -> bool {
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// "November 15, 2023", or "November 15" without the year.
pub fn format_date(date: NaiveDate, include_year: bool) -> String {
    if include_year {
        date.format("%B %-d, %Y").to_string()
    } else {
        date.format("%B %-d").to_string()
    }
}

pub fn format_event_date(date_str: &str, include_year: bool) -> Result<String, DateError> {
    parse_event_date(date_str).map(|date| format_date(date, include_year))
}

pub fn format_event_date_with_year(date_str: &str) -> Result<String, DateError> {
    format_event_date(date_str, true)
}

/// True if the event is today or on any later day.
pub fn is_upcoming_event(date_str: &str) -> Result<bool, DateError> {
    is_upcoming_event_on(date_str, Local::current_date())
}

pub fn is_upcoming_event_on(date_str: &str, today: NaiveDate) -> Result<bool, DateError> {
    parse_event_date(date_str).map(|date| date >= today)
}

/// Whole calendar days between `today` and `date`, by date subtraction so
/// DST transitions never shift the count.
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> RelativeDay {
    RelativeDay::from_day_offset(date.signed_duration_since(today).num_days())
}

pub fn get_relative_event_time(date_str: &str) -> Result<String, DateError> {
    get_relative_event_time_on(date_str, Local::current_date())
}

pub fn get_relative_event_time_on(date_str: &str, today: NaiveDate) -> Result<String, DateError> {
    parse_event_date(date_str).map(|date| relative_day(date, today).to_string())
}
