use trendstitch_core::connector::InterestOverTimeProvider;
use trendstitch_core::{
    DailySeries, FlagSeries, TrendQuery, TrendsError, WindowColumn, WindowPlan, coefficient,
    collapse_columns, daily_from_timeline,
};

use crate::TrendStitcher;

impl TrendStitcher {
    /// Fetch every planned window, scale it onto the previous column and
    /// collapse the columns into one series.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "trendstitch::stitch_windows",
            skip(self, provider, query, plan),
            fields(keyword = %query.keyword, windows = plan.size_hint().0),
        )
    )]
    pub(crate) async fn stitch_windows(
        &self,
        provider: &dyn InterestOverTimeProvider,
        query: &TrendQuery,
        plan: WindowPlan,
    ) -> Result<(DailySeries, FlagSeries), TrendsError> {
        let mut columns: Vec<WindowColumn> = Vec::with_capacity(plan.size_hint().0);

        for planned in plan {
            let window = planned.window;
            progress!(
                self.cfg.verbose,
                keyword = %query.keyword,
                index = planned.index,
                %window,
                "fetching window"
            );
            let raw = provider
                .interest_over_time(&query.request(window.timeframe()))
                .await?;
            if !self.cfg.sleep.is_zero() {
                tokio::time::sleep(self.cfg.sleep).await;
            }

            let mut values = daily_from_timeline(&raw)?;
            if values.is_empty() {
                return Err(TrendsError::data_unavailable(format!(
                    "window {window} returned no observations"
                )));
            }

            let column = match (planned.overlap, columns.last()) {
                (Some(overlap), Some(previous)) => {
                    let coef = coefficient(
                        &values,
                        &previous.values,
                        overlap.start,
                        overlap.end,
                        self.cfg.method,
                    )?;
                    progress!(
                        self.cfg.verbose,
                        %overlap,
                        coefficient = coef,
                        "normalizing by overlapping period"
                    );
                    values.scale(coef);
                    let mut flags = FlagSeries::skeleton(&values);
                    flags.mark(overlap.start, overlap.end);
                    WindowColumn {
                        window,
                        values,
                        flags,
                    }
                }
                _ => WindowColumn::seed(window, values),
            };
            columns.push(column);
        }

        Ok(collapse_columns(&columns, self.cfg.method))
    }
}
