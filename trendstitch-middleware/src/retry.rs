use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use trendstitch_core::connector::{InterestOverTimeProvider, TrendsConnector};
use trendstitch_core::{Middleware, RawSeries, RetryConfig, TrendsError, TrendsRequest};

/// Wrapper that retries rate-limited calls with a linearly growing delay.
///
/// Only `TrendsError::RateLimited` is retried. Once `max_retries` retries have
/// failed the last error is returned inside `TrendsError::RetriesExhausted`.
pub struct RetryingConnector {
    inner: Arc<dyn TrendsConnector>,
    config: RetryConfig,
}

impl RetryingConnector {
    pub fn new(inner: Arc<dyn TrendsConnector>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Active retry policy.
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    fn backoff(&self, attempt: u32, err: &TrendsError) -> Duration {
        let planned = jitter_wait(self.config.delay_for(attempt), self.config.jitter_percent);
        match err {
            TrendsError::RateLimited {
                retry_after_ms: Some(ms),
            } => planned.max(Duration::from_millis(*ms)),
            _ => planned,
        }
    }
}

fn jitter_wait(base: Duration, jitter_percent: u8) -> Duration {
    if jitter_percent == 0 {
        return base;
    }
    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let range = std::cmp::max(1, base_ms.saturating_mul(u64::from(jitter_percent)) / 100);
    let extra = rand::rng().random_range(0..range);
    Duration::from_millis(base_ms.saturating_add(extra))
}

#[async_trait]
impl TrendsConnector for RetryingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn as_interest_provider(&self) -> Option<&dyn InterestOverTimeProvider> {
        if self.inner.as_interest_provider().is_some() {
            Some(self as &dyn InterestOverTimeProvider)
        } else {
            None
        }
    }
}

#[async_trait]
impl InterestOverTimeProvider for RetryingConnector {
    async fn interest_over_time(&self, req: &TrendsRequest) -> Result<RawSeries, TrendsError> {
        let inner = self
            .inner
            .as_interest_provider()
            .ok_or_else(|| TrendsError::connector(self.inner.name(), "interest over time unsupported"))?;

        let mut attempt: u32 = 0;
        loop {
            match inner.interest_over_time(req).await {
                Ok(series) => return Ok(series),
                Err(err) if err.is_transient() && attempt < self.config.max_retries => {
                    let wait = self.backoff(attempt, &err);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        connector = self.inner.name(),
                        timeframe = %req.timeframe,
                        retry = attempt + 1,
                        max_retries = self.config.max_retries,
                        wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                        "rate limited; backing off"
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(err) if err.is_transient() => {
                    return Err(TrendsError::RetriesExhausted {
                        attempts: attempt + 1,
                        last: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Middleware descriptor for [`RetryingConnector`].
pub struct RetryMiddleware {
    pub config: RetryConfig,
}

impl RetryMiddleware {
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self { config }
    }
}

impl Middleware for RetryMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn TrendsConnector>) -> Arc<dyn TrendsConnector> {
        Arc::new(RetryingConnector::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "RetryingConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_retries": self.config.max_retries,
            "base_delay_ms": self.config.base_delay.as_millis(),
            "step_delay_ms": self.config.step_delay.as_millis(),
            "jitter_percent": self.config.jitter_percent,
        })
    }
}
