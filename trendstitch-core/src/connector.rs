use async_trait::async_trait;

use crate::{ConnectorKey, RawSeries, TrendsError, TrendsRequest};

/// Focused role trait for connectors that serve interest-over-time timelines.
#[async_trait]
pub trait InterestOverTimeProvider: Send + Sync {
    /// Fetch the raw timeline for `req`.
    ///
    /// Daily rows are returned for date ranges up to the provider's daily
    /// limit; `Timeframe::LastSevenDays` yields hourly rows.
    ///
    /// # Errors
    /// Implementations return `TrendsError::RateLimited` when throttled so
    /// that retry middleware can tell it apart from terminal failures.
    async fn interest_over_time(&self, req: &TrendsRequest) -> Result<RawSeries, TrendsError>;
}

/// Main connector trait implemented by trends data sources and their wrappers.
#[async_trait]
pub trait TrendsConnector: Send + Sync {
    /// A stable identifier (e.g., "trendstitch-google").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise the interest-over-time capability when supported.
    fn as_interest_provider(&self) -> Option<&dyn InterestOverTimeProvider> {
        None
    }
}
