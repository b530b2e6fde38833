use chrono::NaiveDate;

use crate::timeseries::series::DailySeries;
use crate::{Method, TrendsError};

/// Ratio that rescales `new` so its overlap with `accumulated` matches.
///
/// Both series are restricted to `[start, end]` before the statistic is taken:
/// - `Max`, `Min`, `Sum`: `stat(accumulated) / stat(new)`.
/// - `Mean`: the mean of `accumulated[d] / new[d]` over the days both series
///   define. This is a mean of ratios, not a ratio of means.
///
/// # Errors
/// - `TrendsError::DataUnavailable` if the restricted series share no day.
/// - `TrendsError::UndefinedCoefficient` if a denominator is zero or the
///   resulting ratio is not a finite positive number.
pub fn coefficient(
    new: &DailySeries,
    accumulated: &DailySeries,
    start: NaiveDate,
    end: NaiveDate,
    method: Method,
) -> Result<f64, TrendsError> {
    let new_vals: Vec<f64> = new.range(start, end).map(|(_, v)| v).collect();
    let acc_vals: Vec<f64> = accumulated.range(start, end).map(|(_, v)| v).collect();
    let shares_day = new.range(start, end).any(|(d, _)| accumulated.contains(d));
    if new_vals.is_empty() || acc_vals.is_empty() || !shares_day {
        return Err(TrendsError::data_unavailable(format!(
            "no overlapping observations between {start} and {end}"
        )));
    }

    let coef = match method {
        Method::Max => ratio(max_of(&acc_vals), max_of(&new_vals), method, start, end)?,
        Method::Min => ratio(min_of(&acc_vals), min_of(&new_vals), method, start, end)?,
        Method::Sum => ratio(
            acc_vals.iter().sum(),
            new_vals.iter().sum(),
            method,
            start,
            end,
        )?,
        Method::Mean => mean_of_ratios(new, accumulated, start, end)?,
    };

    if !coef.is_finite() || coef <= 0.0 {
        return Err(TrendsError::undefined_coefficient(format!(
            "{method} coefficient over {start}..={end} is {coef}, expected a positive ratio"
        )));
    }
    Ok(coef)
}

fn ratio(
    numerator: f64,
    denominator: f64,
    method: Method,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64, TrendsError> {
    if denominator == 0.0 {
        return Err(TrendsError::undefined_coefficient(format!(
            "{method} of the new window over {start}..={end} is zero"
        )));
    }
    Ok(numerator / denominator)
}

#[allow(clippy::cast_precision_loss)]
fn mean_of_ratios(
    new: &DailySeries,
    accumulated: &DailySeries,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64, TrendsError> {
    let mut total = 0.0;
    let mut count = 0usize;
    for (date, n) in new.range(start, end) {
        let Some(a) = accumulated.get(date) else {
            continue;
        };
        if n == 0.0 {
            return Err(TrendsError::undefined_coefficient(format!(
                "new window is zero on {date}; pointwise ratio undefined"
            )));
        }
        total += a / n;
        count += 1;
    }
    if count == 0 {
        return Err(TrendsError::data_unavailable(format!(
            "series share no day between {start} and {end}"
        )));
    }
    Ok(total / count as f64)
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}
