//! Parsing of the display timestamps carried by reports.
//!
//! Reports store `date` as `DD/MM/YYYY` and `time` as `HH:MM AM|PM`. Both are
//! matched against fixed patterns and then validated against the calendar, so
//! "31/02/2025" or "13:00 PM" fail instead of rolling over.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::shared::constants::DISPLAY_DATE_TIME_FORMAT;
use crate::shared::validation::{REPORT_DATE_REGEX, REPORT_TIME_REGEX};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("date '{0}' is not in DD/MM/YYYY format")]
    DateFormat(String),

    #[error("time '{0}' is not in HH:MM AM/PM format")]
    TimeFormat(String),

    #[error("date '{0}' does not exist")]
    InvalidDate(String),

    #[error("time '{0}' is out of range")]
    InvalidTime(String),
}

/// Converts a 12-hour clock reading to the 24-hour clock.
///
/// 12 AM is midnight (0), 12 PM stays 12, other PM hours gain 12.
pub fn to_24_hour(hour: u32, pm: bool) -> u32 {
    match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

pub fn parse_report_date(date: &str) -> Result<NaiveDate, TimestampError> {
    let date = date.trim();
    let caps = REPORT_DATE_REGEX
        .captures(date)
        .ok_or_else(|| TimestampError::DateFormat(date.to_string()))?;

    let number = |idx: usize| -> Result<u32, TimestampError> {
        caps[idx]
            .parse::<u32>()
            .map_err(|_| TimestampError::DateFormat(date.to_string()))
    };
    let day = number(1)?;
    let month = number(2)?;
    let year = i32::try_from(number(3)?)
        .map_err(|_| TimestampError::InvalidDate(date.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| TimestampError::InvalidDate(date.to_string()))
}

pub fn parse_report_time(time: &str) -> Result<NaiveTime, TimestampError> {
    let time = time.trim();
    let caps = REPORT_TIME_REGEX
        .captures(time)
        .ok_or_else(|| TimestampError::TimeFormat(time.to_string()))?;

    let hour = caps[1]
        .parse::<u32>()
        .map_err(|_| TimestampError::TimeFormat(time.to_string()))?;
    let minute = caps[2]
        .parse::<u32>()
        .map_err(|_| TimestampError::TimeFormat(time.to_string()))?;
    let pm = caps[3].eq_ignore_ascii_case("pm");

    if !(1..=12).contains(&hour) {
        return Err(TimestampError::InvalidTime(time.to_string()));
    }

    NaiveTime::from_hms_opt(to_24_hour(hour, pm), minute, 0)
        .ok_or_else(|| TimestampError::InvalidTime(time.to_string()))
}

pub fn parse_report_timestamp(date: &str, time: &str) -> Result<NaiveDateTime, TimestampError> {
    Ok(parse_report_date(date)?.and_time(parse_report_time(time)?))
}

/// Formats an instant the way dispatch records display it ("16/03/2025 09:00 AM")
pub fn format_display(instant: NaiveDateTime) -> String {
    instant.format(DISPLAY_DATE_TIME_FORMAT).to_string()
}
