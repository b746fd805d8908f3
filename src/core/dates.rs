//! Date helpers for the timesheet: month arithmetic and the fixed text formats

use crate::error::{TimesheetError, TimesheetResult};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Submission date text, e.g. `31-01-2023`
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// Date in generated file names, e.g. `31-Jan-2023`
pub const GENERATED_FILE_DATE_FORMAT: &str = "%d-%b-%Y";
/// Month header label, e.g. `Jan`
pub const MONTH_FORMAT: &str = "%b";
/// Day-of-month field, e.g. `31/01`
pub const DAY_OF_MONTH_FORMAT: &str = "%d/%m";

fn invalid_month(year: i32, month: u32) -> TimesheetError {
    TimesheetError::InvalidDate(format!("{}-{:02} is not a valid month", year, month))
}

/// Last calendar day of a 1-based month: day zero of the following month
pub fn last_day_of_month(year: i32, month: u32) -> TimesheetResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| invalid_month(year, month))
}

/// Year and month of the month before `(year, month)`
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Move `now` into the given year/month, clamping the day to the month's length
pub fn today_in(year: i32, month: u32, now: NaiveDate) -> TimesheetResult<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    let day = now.day().min(last.day());
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid_month(year, month))
}

/// Calendar date of an Excel serial day count (1900 date system).
///
/// Serials from 61 on count from 1899-12-30; below that Excel's phantom
/// 29 Feb 1900 shifts the epoch by a day.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = serial.trunc() as u64;
    let epoch = if days < 61 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    epoch.checked_add_days(Days::new(days))
}

/// Locale-invariant 3-letter month label used in the template header
pub fn month_label(year: i32, month: u32) -> TimesheetResult<String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| invalid_month(year, month))?;
    Ok(first.format(MONTH_FORMAT).to_string())
}
