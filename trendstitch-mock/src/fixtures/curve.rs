use std::f64::consts::TAU;

use chrono::{Datelike, NaiveDate};

/// Underlying daily popularity of `keyword` on `date`, always positive.
///
/// Yearly seasonality, a weekly cycle and a slow upward drift, phase-shifted
/// by the keyword so different keywords do not share a curve.
pub fn popularity(keyword: &str, date: NaiveDate) -> f64 {
    let seed = keyword.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    let phase = f64::from(seed % 365);
    let day = f64::from(date.num_days_from_ce());
    let yearly = 30.0 * ((day + phase) * TAU / 365.25).sin();
    let weekly = 8.0 * (day * TAU / 7.0).sin();
    let drift = (day - 730_000.0) / 100.0;
    (60.0 + yearly + weekly + drift).max(1.0)
}

/// Hourly share of a day's popularity; peaks in the evening.
pub fn hourly_share(hour: u32) -> f64 {
    let h = f64::from(hour);
    (1.0 + 0.5 * ((h - 18.0) * TAU / 24.0).cos()) / 24.0
}
