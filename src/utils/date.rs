use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Like `parse_date`, failing with `InvalidDate`.
pub fn parse_iso(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn date_shift(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Most recent Saturday strictly before `from` (a Saturday maps to the
/// previous week's). Timesheet weeks end on Saturday.
pub fn last_saturday_before(from: NaiveDate) -> NaiveDate {
    let back = from.weekday().number_from_monday() % 7 + 1;
    from - Duration::days(back as i64)
}

pub fn last_saturday() -> NaiveDate {
    last_saturday_before(today())
}

/// Weekday labels for the seven days of a week ending on `enddate`.
pub fn week_labels(enddate: NaiveDate) -> Vec<String> {
    (0..7)
        .map(|d| date_shift(enddate, d - 6).format("%a %d").to_string())
        .collect()
}
