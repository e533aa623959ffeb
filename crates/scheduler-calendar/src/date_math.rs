//! Pure calendar arithmetic for every view mode.
//!
//! Weeks start on Sunday (weekday index 0). Month and year shifts clamp the
//! day-of-month to the last valid day of the target month, so they are not
//! always invertible: 2024-01-31 moves forward to 2024-02-29 and back to
//! 2024-01-29.

use chrono::{Datelike, Days, Months, NaiveDate};
use scheduler_core::ValidationError;

use crate::types::ViewMode;

/// Wire format of event dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Step direction for `shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Human-readable title of the period containing `reference`.
pub fn period_title(reference: NaiveDate, mode: ViewMode) -> String {
    match mode {
        ViewMode::Annual => format!("{:04}", reference.year()),
        ViewMode::Monthly => reference.format("%B %Y").to_string(),
        ViewMode::Weekly => {
            let start = week_start(reference);
            format!("Week: {} - {}", short_date(start), short_date(week_end(start)))
        }
        ViewMode::Daily => reference.format("%A, %B %-d, %Y").to_string(),
    }
}

fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Move `reference` one period in `direction`.
///
/// Returns `reference` unchanged if the result would fall outside the
/// representable date range.
pub fn shift(reference: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    let shifted = match (mode, direction) {
        (ViewMode::Annual, Direction::Forward) => reference.checked_add_months(Months::new(12)),
        (ViewMode::Annual, Direction::Backward) => reference.checked_sub_months(Months::new(12)),
        (ViewMode::Monthly, Direction::Forward) => reference.checked_add_months(Months::new(1)),
        (ViewMode::Monthly, Direction::Backward) => reference.checked_sub_months(Months::new(1)),
        (ViewMode::Weekly, Direction::Forward) => reference.checked_add_days(Days::new(7)),
        (ViewMode::Weekly, Direction::Backward) => reference.checked_sub_days(Days::new(7)),
        (ViewMode::Daily, Direction::Forward) => reference.checked_add_days(Days::new(1)),
        (ViewMode::Daily, Direction::Backward) => reference.checked_sub_days(Days::new(1)),
    };

    shifted.unwrap_or_else(|| {
        tracing::warn!("Cannot shift {} by one {} period", reference, mode);
        reference
    })
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(date)
}

/// The Saturday closing the week that starts on `start`.
pub fn week_end(start: NaiveDate) -> NaiveDate {
    start.checked_add_days(Days::new(6)).unwrap_or(start)
}

/// Number of days in the 0-based month `month0` of `year`.
///
/// # Errors
/// Returns `ValidationError::InvalidMonth` if `month0` is not in `0..12`.
pub fn days_in_month(year: i32, month0: u32) -> Result<u32, ValidationError> {
    let first = first_of_month(year, month0)?;
    Ok(month_length(first))
}

/// Sunday-based weekday index (0..=6) of the first day of `month0`.
///
/// # Errors
/// Returns `ValidationError::InvalidMonth` if `month0` is not in `0..12`.
pub fn first_weekday_of_month(year: i32, month0: u32) -> Result<u32, ValidationError> {
    let first = first_of_month(year, month0)?;
    Ok(first.weekday().num_days_from_sunday())
}

/// First day of the 0-based month `month0` of `year`.
///
/// # Errors
/// Returns `ValidationError::InvalidMonth` if `month0` is not in `0..12`
/// or the year is outside the supported range.
pub fn first_of_month(year: i32, month0: u32) -> Result<NaiveDate, ValidationError> {
    if month0 >= 12 {
        return Err(ValidationError::InvalidMonth(month0));
    }
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or(ValidationError::InvalidMonth(month0))
}

/// Length of the month containing `date`.
pub(crate) fn month_length(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // Only December of the last representable year has no successor
        None => 31,
    }
}

/// Parse a `YYYY-MM-DD` date, trimming surrounding whitespace.
///
/// # Errors
/// Returns `ValidationError::MissingDate` for blank input and
/// `ValidationError::InvalidDate` for anything that does not parse.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(trimmed.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
