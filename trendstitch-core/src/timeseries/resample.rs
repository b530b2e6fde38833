use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::timeseries::series::DailySeries;
use crate::{RawSeries, TrendsError};

/// Hourly observations that make up a complete day.
pub const HOURS_PER_DAY: usize = 24;

/// Convert a daily provider timeline into a [`DailySeries`].
///
/// Only the first keyword's value of each row is kept; `is_partial` is ignored.
///
/// # Errors
/// Returns `TrendsError::Data` if a row carries no value or two rows fall on
/// the same UTC day.
pub fn daily_from_timeline(raw: &RawSeries) -> Result<DailySeries, TrendsError> {
    let pairs = raw
        .points
        .iter()
        .map(|p| Ok((p.ts.date_naive(), first_value(p.values.as_slice(), p.ts)?)))
        .collect::<Result<Vec<_>, TrendsError>>()?;
    DailySeries::try_from_pairs(pairs)
}

/// Hourly observations summed per UTC day, with the number of hours seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyRollup {
    /// Sum of the hourly values for each day.
    pub totals: DailySeries,
    /// Number of hourly rows that fed each day.
    pub hours: BTreeMap<NaiveDate, usize>,
}

impl DailyRollup {
    /// Drop the earliest day when fewer than `required` hours contributed to it.
    ///
    /// Returns the dropped day.
    pub fn drop_incomplete_first_day(&mut self, required: usize) -> Option<NaiveDate> {
        let (&first, &count) = self.hours.iter().next()?;
        if count >= required {
            return None;
        }
        self.hours.remove(&first);
        self.totals.remove(first);
        Some(first)
    }

    /// Daily totals.
    #[must_use]
    pub fn into_series(self) -> DailySeries {
        self.totals
    }
}

/// Sum an hourly provider timeline into daily totals keyed by UTC date.
///
/// # Errors
/// Returns `TrendsError::Data` if a row carries no value.
pub fn resample_hourly_to_daily(raw: &RawSeries) -> Result<DailyRollup, TrendsError> {
    let mut rollup = DailyRollup::default();
    for point in &raw.points {
        let date = point.ts.date_naive();
        let value = first_value(point.values.as_slice(), point.ts)?;
        let total = rollup.totals.get(date).unwrap_or(0.0) + value;
        rollup.totals.insert(date, total);
        *rollup.hours.entry(date).or_insert(0) += 1;
    }
    Ok(rollup)
}

fn first_value(values: &[f64], ts: chrono::DateTime<chrono::Utc>) -> Result<f64, TrendsError> {
    values
        .first()
        .copied()
        .ok_or_else(|| TrendsError::Data(format!("timeline row at {ts} has no value")))
}
