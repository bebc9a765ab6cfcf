use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::{date_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::scale::tick_increment;
use crate::error::ChartResult;

const SECOND: f64 = 1.0;
const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;
const YEAR: f64 = 365.0 * DAY;

/// Upper bound on generated ticks, guarding against pathological domains.
const MAX_TIME_TICKS: usize = 512;

/// Calendar interval used to place time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInterval {
    /// Fixed step in seconds (seconds, minutes and hours).
    Fixed(u32),
    /// Every `n`-th day of the month, starting on the 1st.
    Days(u32),
    /// Sundays.
    Week,
    /// First of every `n`-th month, starting in January.
    Months(u32),
    /// January 1st of every `n`-th year.
    Years(u32),
}

const TICK_INTERVALS: [(TimeInterval, f64); 17] = [
    (TimeInterval::Fixed(1), SECOND),
    (TimeInterval::Fixed(5), 5.0 * SECOND),
    (TimeInterval::Fixed(15), 15.0 * SECOND),
    (TimeInterval::Fixed(30), 30.0 * SECOND),
    (TimeInterval::Fixed(60), MINUTE),
    (TimeInterval::Fixed(300), 5.0 * MINUTE),
    (TimeInterval::Fixed(900), 15.0 * MINUTE),
    (TimeInterval::Fixed(1_800), 30.0 * MINUTE),
    (TimeInterval::Fixed(3_600), HOUR),
    (TimeInterval::Fixed(10_800), 3.0 * HOUR),
    (TimeInterval::Fixed(21_600), 6.0 * HOUR),
    (TimeInterval::Fixed(43_200), 12.0 * HOUR),
    (TimeInterval::Days(1), DAY),
    (TimeInterval::Days(2), 2.0 * DAY),
    (TimeInterval::Week, WEEK),
    (TimeInterval::Months(1), MONTH),
    (TimeInterval::Months(3), 3.0 * MONTH),
];

/// Continuous time scale: unix seconds in, pixels out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(time_start: f64, time_end: f64, range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self {
            linear: LinearScale::new((time_start, time_end), range)?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn apply(self, time: f64) -> f64 {
        self.linear.apply(time)
    }

    #[must_use]
    pub fn apply_date(self, date: NaiveDate) -> f64 {
        self.apply(date_to_unix_seconds(date))
    }

    /// Maps a pixel back to unix seconds.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }

    #[must_use]
    pub fn invert_datetime(self, pixel: f64) -> Option<NaiveDateTime> {
        unix_seconds_to_datetime(self.invert(pixel))
    }

    /// Picks the calendar interval whose step best matches `tick_count` ticks.
    #[must_use]
    pub fn tick_interval(self, tick_count: usize) -> Option<TimeInterval> {
        let (start, stop) = self.ordered_domain();
        if tick_count == 0 || stop <= start {
            return None;
        }

        let target = (stop - start) / tick_count as f64;
        let index = TICK_INTERVALS.partition_point(|(_, duration)| *duration <= target);
        if index == TICK_INTERVALS.len() {
            let years = tick_increment(start / YEAR, stop / YEAR, tick_count).max(1.0);
            return Some(TimeInterval::Years(years as u32));
        }
        if index == 0 {
            return Some(TICK_INTERVALS[0].0);
        }

        let (lower, lower_duration) = TICK_INTERVALS[index - 1];
        let (upper, upper_duration) = TICK_INTERVALS[index];
        Some(if target / lower_duration < upper_duration / target {
            lower
        } else {
            upper
        })
    }

    /// Tick positions (unix seconds) aligned to calendar boundaries.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        let (start, stop) = self.ordered_domain();
        match self.tick_interval(tick_count) {
            Some(interval) => interval_ticks(interval, start, stop),
            None if start == stop => vec![start],
            None => Vec::new(),
        }
    }

    fn ordered_domain(self) -> (f64, f64) {
        let (a, b) = self.domain();
        (a.min(b), a.max(b))
    }
}

/// Formats a tick with the coarsest calendar unit that still distinguishes it.
#[must_use]
pub fn format_time_tick(seconds: f64) -> String {
    let Some(value) = unix_seconds_to_datetime(seconds) else {
        return String::new();
    };

    let pattern = if value.nanosecond() != 0 {
        ".%3f"
    } else if value.second() != 0 {
        ":%S"
    } else if value.minute() != 0 {
        "%I:%M"
    } else if value.hour() != 0 {
        "%I %p"
    } else if value.day() != 1 {
        if value.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if value.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    value.format(pattern).to_string()
}

fn interval_ticks(interval: TimeInterval, start: f64, stop: f64) -> Vec<f64> {
    match interval {
        TimeInterval::Fixed(step) => {
            let step = f64::from(step.max(1));
            let mut ticks = Vec::new();
            let mut tick = (start / step).ceil() * step;
            while tick <= stop && ticks.len() < MAX_TIME_TICKS {
                ticks.push(tick);
                tick += step;
            }
            ticks
        }
        TimeInterval::Days(every) => calendar_days(start, stop)
            .filter(|day| (day.day0() % every.max(1)) == 0)
            .map(date_to_unix_seconds)
            .collect(),
        TimeInterval::Week => calendar_days(start, stop)
            .filter(|day| day.weekday() == Weekday::Sun)
            .map(date_to_unix_seconds)
            .collect(),
        TimeInterval::Months(every) => calendar_days(start, stop)
            .filter(|day| day.day() == 1 && day.month0() % every.max(1) == 0)
            .map(date_to_unix_seconds)
            .collect(),
        TimeInterval::Years(every) => year_ticks(start, stop, every.max(1)),
    }
}

/// Midnights within `[start, stop]`, capped at a few years of days.
fn calendar_days(start: f64, stop: f64) -> impl Iterator<Item = NaiveDate> {
    let first = unix_seconds_to_datetime(start).and_then(|value| {
        let date = value.date();
        if value.time() == NaiveTime::MIN {
            Some(date)
        } else {
            date.succ_opt()
        }
    });
    let last = unix_seconds_to_datetime(stop).map(|value| value.date());

    let mut cursor = first;
    std::iter::from_fn(move || {
        let day = cursor?;
        if last.is_none_or(|last| day > last) {
            return None;
        }
        cursor = day.succ_opt();
        Some(day)
    })
    .take(MAX_TIME_TICKS * 31)
}

fn year_ticks(start: f64, stop: f64, every: u32) -> Vec<f64> {
    let (Some(first), Some(last)) = (
        unix_seconds_to_datetime(start),
        unix_seconds_to_datetime(stop),
    ) else {
        return Vec::new();
    };

    let every = every as i32;
    let mut year = first.year();
    if NaiveDate::from_ymd_opt(year, 1, 1)
        .is_some_and(|jan1| date_to_unix_seconds(jan1) < start)
    {
        year += 1;
    }
    year = year.div_euclid(every) * every + if year.rem_euclid(every) == 0 { 0 } else { every };

    let mut ticks = Vec::new();
    while year <= last.year() && ticks.len() < MAX_TIME_TICKS {
        if let Some(jan1) = NaiveDate::from_ymd_opt(year, 1, 1) {
            ticks.push(date_to_unix_seconds(jan1));
        }
        year += every;
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(y: i32, m: u32, d: u32) -> f64 {
        date_to_unix_seconds(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
    }

    #[test]
    fn ten_day_span_uses_daily_ticks() {
        let scale =
            TimeScale::new(seconds(2024, 1, 1), seconds(2024, 1, 10), (0.0, 900.0)).expect("scale");
        assert_eq!(scale.tick_interval(10), Some(TimeInterval::Days(1)));
        assert_eq!(scale.ticks(10).len(), 10);
    }

    #[test]
    fn multi_year_span_uses_year_ticks() {
        let scale =
            TimeScale::new(seconds(2000, 6, 1), seconds(2024, 6, 1), (0.0, 900.0)).expect("scale");
        let ticks = scale.ticks(10);
        assert!(matches!(scale.tick_interval(10), Some(TimeInterval::Years(_))));
        assert!(ticks.iter().all(|tick| format_time_tick(*tick).len() == 4));
    }

    #[test]
    fn tick_labels_follow_calendar_boundaries() {
        assert_eq!(format_time_tick(seconds(2024, 1, 1)), "2024");
        assert_eq!(format_time_tick(seconds(2024, 3, 1)), "March");
        assert_eq!(format_time_tick(seconds(2024, 3, 3)), "Mar 03");
        assert_eq!(format_time_tick(seconds(2024, 3, 4)), "Mon 04");
        assert_eq!(format_time_tick(seconds(2024, 3, 4) + 15.0 * 3600.0), "03 PM");
    }
}
