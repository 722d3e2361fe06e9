use crate::error::{config_error, invalid_argument, ScheduleResult};
use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// Gregorian leap year rule
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Fail with `InvalidArgument` unless `month` is in 1..=12
pub fn check_month(month: u32) -> ScheduleResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(invalid_argument(&format!(
            "month must be between 1 and 12, got {}",
            month
        )))
    }
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> ScheduleResult<u32> {
    check_month(month)?;
    let days = match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    };
    Ok(days)
}

/// Day of week for a date, 0 = Sunday .. 6 = Saturday
pub fn day_of_week(year: i32, month: u32, day: u32) -> ScheduleResult<u32> {
    check_month(month)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        invalid_argument(&format!("{} is not a valid date", format_iso_date(year, month, day)))
    })?;
    Ok(date.weekday().num_days_from_sunday())
}

/// Zero padded YYYY-MM-DD
pub fn format_iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Parse a YYYY-MM-DD string
pub fn parse_iso_date(value: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        invalid_argument(&format!("Invalid date '{}'. Expected YYYY-MM-DD", value))
    })
}

/// Today's date in the named timezone (e.g. "Asia/Seoul")
pub fn today_in(timezone: &str) -> ScheduleResult<NaiveDate> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| config_error(&format!("Unknown timezone: {}", timezone)))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}
