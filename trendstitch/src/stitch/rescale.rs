use chrono::NaiveDate;
use trendstitch_core::{DailySeries, FlagSeries, TrendsError};
use trendstitch_types::{DailyTrend, TrendPoint};

/// Restrict to `[start, end]` and scale so the maximum becomes 100.
///
/// Every day in the range must have a value. An all-zero range is returned
/// unchanged.
pub(crate) fn rescale(
    keyword: &str,
    values: &DailySeries,
    flags: &FlagSeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DailyTrend, TrendsError> {
    let mut range = values.restrict(start, end);
    if let Some(missing) = start.iter_days().take_while(|d| *d <= end).find(|d| !range.contains(*d)) {
        return Err(TrendsError::data_unavailable(format!(
            "no value for {missing} in {start}..={end}"
        )));
    }

    let max = range.max().unwrap_or(0.0);
    if max > 0.0 {
        range.scale(100.0 / max);
        range.round();
    }

    let points = range
        .iter()
        .map(|(date, value)| TrendPoint {
            date,
            value,
            overlap: flags.get(date).unwrap_or(false),
        })
        .collect();
    Ok(DailyTrend {
        keyword: keyword.to_string(),
        points,
    })
}
