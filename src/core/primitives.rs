use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{ChartError, ChartResult};

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Tooltip date format, e.g. "March 3, 2024".
pub const TOOLTIP_DATE_FORMAT: &str = "%B %-d, %Y";

/// Parses a calendar date string with an explicit `chrono` format.
pub fn parse_calendar_date(date: &str, format: &'static str) -> ChartResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), format).map_err(|_| ChartError::InvalidDate {
        date: date.to_owned(),
        format,
    })
}

/// Midnight UTC of `date` as unix seconds.
#[must_use]
pub fn date_to_unix_seconds(date: NaiveDate) -> f64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp() as f64
}

/// Inverse of [`date_to_unix_seconds`] with sub-second precision.
///
/// Returns `None` for non-finite input or values outside `chrono`'s range.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).map(|value| value.naive_utc())
}

/// Human-readable date for tooltips.
#[must_use]
pub fn format_tooltip_date(seconds: f64) -> String {
    unix_seconds_to_datetime(seconds)
        .map(|value| value.format(TOOLTIP_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Tooltip value text: the number's `Display` form, empty for NaN or infinities.
#[must_use]
pub fn format_tooltip_value(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        String::new()
    }
}

/// Plain number formatting for value-axis ticks.
///
/// Integral values print without a fractional part; tiny float noise from tick
/// arithmetic (`0.30000000000000004`) is rounded away.
#[must_use]
pub fn format_plain_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let integral = value.round();
    if (value - integral).abs() < 1e-9 {
        return if integral == 0.0 {
            "0".to_owned()
        } else {
            format!("{integral}")
        };
    }
    let fixed = format!("{value:.10}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}
