mod rescale;
mod tail;
mod windows;

use chrono::NaiveDate;
use trendstitch_core::{TrendQuery, TrendsError, plan_windows};
use trendstitch_types::DailyTrend;

use crate::TrendStitcher;

impl TrendStitcher {
    /// Rebuild the daily series of `query.keyword` over `[start, end]`.
    ///
    /// Windows are fetched latest first and rescaled onto each other through
    /// their overlaps. When daily data stops short of `end`, the most recent
    /// days are filled from hourly data. The result is rescaled so its maximum
    /// is 100 (an all-zero range stays zero).
    ///
    /// # Errors
    /// - `InvalidArg` for an empty keyword, `start >= end` or an inconsistent
    ///   window configuration, before any fetch.
    /// - `RetriesExhausted` or any other connector error from a fetch.
    /// - `DataUnavailable` when a window is empty, an overlap has no shared
    ///   days, or the final range has a gap.
    /// - `UndefinedCoefficient` when an overlap cannot be scaled.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "trendstitch::daily_trend",
            skip(self, query),
            fields(keyword = %query.keyword, geo = %query.geo, method = %self.cfg.method),
        )
    )]
    pub async fn daily_trend(
        &self,
        query: &TrendQuery,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailyTrend, TrendsError> {
        if query.keyword.trim().is_empty() {
            return Err(TrendsError::InvalidArg("keyword must be non-empty".into()));
        }
        let plan = plan_windows(start, end, &self.cfg)?;
        let provider = self.provider()?;

        let (mut values, mut flags) = self.stitch_windows(provider, query, plan).await?;

        if values.last_date().is_none_or(|last| last < end) {
            progress!(
                self.cfg.verbose,
                last = ?values.last_date(),
                %end,
                "daily data ends early; merging hourly tail"
            );
            self.merge_tail(provider, query, &mut values, &mut flags)
                .await?;
        }

        rescale::rescale(&query.keyword, &values, &flags, start, end)
    }
}
