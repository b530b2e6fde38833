#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use trendstitch_core::{RawSeries, TimelinePoint};

/// Day `n` of the synthetic calendar; day 1 is 2019-01-01.
pub fn day(n: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 12, 31).unwrap() + Days::new(n)
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily timeline with one row per `(date, value)`.
pub fn daily_raw<I>(rows: I) -> RawSeries
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    RawSeries::new(
        rows.into_iter()
            .map(|(d, v)| TimelinePoint {
                ts: d.and_hms_opt(0, 0, 0).unwrap().and_utc(),
                values: vec![v],
                is_partial: false,
            })
            .collect(),
    )
}

/// Hourly timeline: `hours` rows per date starting at `24 - hours`.
pub fn hourly_raw(days: &[(NaiveDate, u32, f64)]) -> RawSeries {
    let mut points = Vec::new();
    for &(date, hours, per_hour) in days {
        for h in (24 - hours)..24 {
            points.push(TimelinePoint {
                ts: date.and_hms_opt(h, 0, 0).unwrap().and_utc(),
                values: vec![per_hour],
                is_partial: false,
            });
        }
    }
    RawSeries::new(points)
}

/// Window A: days 1..=269 at 50, days 170..=269 ramping from 50 to 100.
pub fn window_a() -> RawSeries {
    daily_raw((1..=269u32).map(|i| {
        let v = if i < 170 {
            50.0
        } else {
            50.0 + 50.0 * f64::from(i - 170) / 99.0
        };
        (day(u64::from(i)), v)
    }))
}

/// Window B: days 170..=438, flat 25 through day 269, then rising to 100.
pub fn window_b() -> RawSeries {
    daily_raw((170..=438u32).map(|i| {
        let v = if i <= 269 {
            25.0
        } else {
            25.0 + 75.0 * f64::from(i - 269) / 169.0
        };
        (day(u64::from(i)), v)
    }))
}
