use async_trait::async_trait;
use chrono::{Days, NaiveDate, TimeZone, Utc};
use trendstitch_core::connector::{InterestOverTimeProvider, TrendsConnector};
use trendstitch_core::{
    MAX_DAILY_WINDOW_DAYS, RawSeries, Timeframe, TimelinePoint, TrendsError, TrendsRequest,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};
pub use fixtures::curve::popularity;

/// Mock connector with deterministic synthetic data.
///
/// Every daily window is normalized so its largest value is 100, the way the
/// live service reports relative interest. Daily data stops `lag_days` before
/// `today`; the last-seven-days timeframe returns hourly rows whose first day
/// starts at 06:00 and is therefore incomplete.
///
/// Keywords `FAIL`, `EMPTY` and `RATELIMIT` force a connector error, an
/// empty timeline and a rate-limit error respectively.
pub struct MockConnector {
    today: NaiveDate,
    lag_days: u64,
}

impl MockConnector {
    /// Mock whose clock reads `today`, with daily data lagging two days.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today, lag_days: 2 }
    }

    /// Change how many days daily data lags behind `today`.
    #[must_use]
    pub const fn with_lag_days(mut self, lag_days: u64) -> Self {
        self.lag_days = lag_days;
        self
    }

    /// Date the mock treats as today.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    fn daily(&self, keyword: &str, start: NaiveDate, end: NaiveDate) -> Result<RawSeries, TrendsError> {
        if (end - start).num_days() > i64::from(MAX_DAILY_WINDOW_DAYS) {
            return Err(TrendsError::InvalidArg(format!(
                "window {start}..={end} is too long for daily data"
            )));
        }
        let last = self
            .today
            .checked_sub_days(Days::new(self.lag_days))
            .map_or(end, |d| d.min(end));
        let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= last).collect();
        let raw: Vec<f64> = days.iter().map(|d| popularity(keyword, *d)).collect();
        let max = raw.iter().copied().fold(0.0, f64::max);
        let points = days
            .into_iter()
            .zip(raw)
            .map(|(d, v)| TimelinePoint {
                ts: d.and_time(chrono::NaiveTime::MIN).and_utc(),
                values: vec![v * 100.0 / max],
                is_partial: false,
            })
            .collect();
        Ok(RawSeries::new(points))
    }

    fn hourly(&self, keyword: &str) -> RawSeries {
        let mut rows = Vec::new();
        for back in (0..=7u64).rev() {
            let Some(date) = self.today.checked_sub_days(Days::new(back)) else {
                continue;
            };
            let first_hour = if back == 7 { 6 } else { 0 };
            // today is still being collected
            let last_hour = if back == 0 { 12 } else { 24 };
            for hour in first_hour..last_hour {
                let ts = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
                    + chrono::Duration::hours(i64::from(hour));
                rows.push((ts, popularity(keyword, date) * fixtures::curve::hourly_share(hour), back == 0));
            }
        }
        let max = rows.iter().map(|r| r.1).fold(0.0, f64::max);
        RawSeries::new(
            rows.into_iter()
                .map(|(ts, v, partial)| TimelinePoint {
                    ts,
                    values: vec![v * 100.0 / max],
                    is_partial: partial,
                })
                .collect(),
        )
    }
}

#[async_trait]
impl TrendsConnector for MockConnector {
    fn name(&self) -> &'static str {
        "trendstitch-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_interest_provider(&self) -> Option<&dyn InterestOverTimeProvider> {
        Some(self as &dyn InterestOverTimeProvider)
    }
}

#[async_trait]
impl InterestOverTimeProvider for MockConnector {
    async fn interest_over_time(&self, req: &TrendsRequest) -> Result<RawSeries, TrendsError> {
        let keyword = req
            .keywords
            .first()
            .ok_or_else(|| TrendsError::InvalidArg("no keyword requested".into()))?;
        match keyword.as_str() {
            "FAIL" => {
                return Err(TrendsError::connector(
                    "trendstitch-mock",
                    "forced failure: interest_over_time",
                ));
            }
            "EMPTY" => return Ok(RawSeries::default()),
            "RATELIMIT" => return Err(TrendsError::RateLimited { retry_after_ms: None }),
            _ => {}
        }
        match req.timeframe {
            Timeframe::Dates { start, end } => self.daily(keyword, start, end),
            Timeframe::LastSevenDays => Ok(self.hourly(keyword)),
        }
    }
}
