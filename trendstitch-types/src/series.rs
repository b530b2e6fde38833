//! Raw provider observations and the stitched output table.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One row of a provider timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Start of the sampled period (UTC midnight for daily rows, the hour for hourly rows).
    pub ts: DateTime<Utc>,
    /// One value per requested keyword, in request order.
    pub values: Vec<f64>,
    /// Provider marker for a period that is still being collected.
    pub is_partial: bool,
}

/// Timeline returned by a single connector call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    /// Rows in provider order.
    pub points: Vec<TimelinePoint>,
}

impl RawSeries {
    /// Wrap a list of points.
    #[must_use]
    pub const fn new(points: Vec<TimelinePoint>) -> Self {
        Self { points }
    }

    /// True when the provider returned no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }
}

/// One day of the stitched output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Interest on the provider's 0 to 100 scale.
    pub value: f64,
    /// Whether the value was derived through an overlap coefficient.
    pub overlap: bool,
}

/// Normalized continuous daily series for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrend {
    /// Keyword the series belongs to.
    pub keyword: String,
    /// One point per day, ascending.
    pub points: Vec<TrendPoint>,
}

impl DailyTrend {
    /// Largest value in the series, if any.
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    /// First and last day covered.
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// Value recorded for `date`.
    #[must_use]
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].value)
    }

    /// Convert to a `polars` frame with `date`, `<keyword>` and `overlap` columns.
    ///
    /// # Errors
    /// Returns `TrendsError::Data` if a date falls outside the `Date` range or
    /// polars rejects the columns.
    #[cfg(feature = "dataframe")]
    pub fn to_dataframe(&self) -> Result<polars::prelude::DataFrame, crate::TrendsError> {
        use polars::prelude::{Column, DataFrame, DataType};

        let epoch = NaiveDate::default();
        let days = self
            .points
            .iter()
            .map(|p| {
                i32::try_from((p.date - epoch).num_days())
                    .map_err(|e| crate::TrendsError::Data(e.to_string()))
            })
            .collect::<Result<Vec<i32>, _>>()?;
        let values: Vec<f64> = self.points.iter().map(|p| p.value).collect();
        let flags: Vec<bool> = self.points.iter().map(|p| p.overlap).collect();

        let df = DataFrame::new(vec![
            Column::new("date".into(), days).cast(&DataType::Date)?,
            Column::new(self.keyword.as_str().into(), values),
            Column::new("overlap".into(), flags),
        ])?;
        Ok(df)
    }
}
