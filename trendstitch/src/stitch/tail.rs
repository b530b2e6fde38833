use trendstitch_core::connector::InterestOverTimeProvider;
use trendstitch_core::{
    DailySeries, FlagSeries, HOURS_PER_DAY, Timeframe, TrendQuery, TrendsError, coefficient,
    resample_hourly_to_daily,
};

use crate::TrendStitcher;

impl TrendStitcher {
    /// Extend `values` with the latest days built from hourly data.
    ///
    /// Days the stitched series already has keep their values; only their
    /// overlap flags are raised.
    pub(crate) async fn merge_tail(
        &self,
        provider: &dyn InterestOverTimeProvider,
        query: &TrendQuery,
        values: &mut DailySeries,
        flags: &mut FlagSeries,
    ) -> Result<(), TrendsError> {
        let raw = provider
            .interest_over_time(&query.request(Timeframe::LastSevenDays))
            .await?;
        let mut rollup = resample_hourly_to_daily(&raw)?;
        if let Some(_dropped) = rollup.drop_incomplete_first_day(HOURS_PER_DAY) {
            progress!(self.cfg.verbose, day = %_dropped, "dropping incomplete first hourly day");
        }
        let mut tail = rollup.into_series();

        let shared: Vec<_> = tail.dates().filter(|d| values.contains(*d)).collect();
        let (Some(&first), Some(&last)) = (shared.first(), shared.last()) else {
            return Err(TrendsError::data_unavailable(
                "hourly tail shares no day with the stitched series",
            ));
        };
        let tail_shared: DailySeries = shared
            .iter()
            .filter_map(|d| tail.get(*d).map(|v| (*d, v)))
            .collect();
        let acc_shared: DailySeries = shared
            .iter()
            .filter_map(|d| values.get(*d).map(|v| (*d, v)))
            .collect();
        let coef = coefficient(&tail_shared, &acc_shared, first, last, self.cfg.method)?;
        progress!(
            self.cfg.verbose,
            %first,
            %last,
            coefficient = coef,
            "normalizing hourly tail by overlapping period"
        );

        tail.scale(coef);
        tail.round();
        for (date, value) in tail.iter() {
            if values.contains(date) {
                flags.merge_or(date, true);
            } else {
                values.insert(date, value);
                flags.merge_or(date, false);
            }
        }
        Ok(())
    }
}
