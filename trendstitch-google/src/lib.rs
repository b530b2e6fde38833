//! trendstitch-google
//!
//! Connector that implements `TrendsConnector` on top of the Google Trends web
//! API. A request is resolved in two steps: the explore endpoint hands out a
//! `TIMESERIES` widget with a token, and the multiline endpoint returns the
//! interest-over-time rows for that widget.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
mod builder;

use std::sync::Arc;
use std::time::Duration;

use adapter::{RealAdapter, TrendsApi};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use trendstitch_core::connector::{InterestOverTimeProvider, TrendsConnector};
use trendstitch_core::{ConnectorKey, RawSeries, TrendsError, TrendsRequest};

pub use builder::GoogleTrendsBuilder;

const TIMESERIES_WIDGET: &str = "TIMESERIES";

/// HTTP settings for [`GoogleTrendsConnector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleTrendsConfig {
    /// Service root; endpoint paths are joined onto it, so keep a trailing slash.
    pub base_url: String,
    /// Host language, e.g. `en-US`.
    pub hl: String,
    /// Timezone offset in minutes sent as `tz`.
    pub tz_offset_minutes: i32,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Visit the home page once before the first API call to pick up cookies.
    pub warm_up: bool,
}

impl Default for GoogleTrendsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://trends.google.com/".to_string(),
            hl: "en-US".to_string(),
            tz_offset_minutes: 360,
            timeout: Duration::from_secs(30),
            warm_up: true,
        }
    }
}

/// Public connector type.
pub struct GoogleTrendsConnector {
    api: Arc<dyn TrendsApi>,
}

impl GoogleTrendsConnector {
    /// Static connector key.
    pub const KEY: ConnectorKey = ConnectorKey::new("trendstitch-google");

    /// Connector talking to the live service with `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new(config: GoogleTrendsConfig) -> Result<Self, TrendsError> {
        Ok(Self::from_api(Arc::new(RealAdapter::new(config)?)))
    }

    /// Connector with [`GoogleTrendsConfig::default`].
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_default() -> Result<Self, TrendsError> {
        Self::try_new(GoogleTrendsConfig::default())
    }

    /// Build around any adapter (tests inject fakes here).
    #[must_use]
    pub fn from_api(api: Arc<dyn TrendsApi>) -> Self {
        Self { api }
    }

    fn normalize_error(e: TrendsError, what: &str) -> TrendsError {
        match e {
            TrendsError::Other(msg) => TrendsError::connector(Self::KEY.as_str(), msg),
            TrendsError::Connector { msg, .. } if msg.contains("status 404") => {
                TrendsError::not_found(what.to_string())
            }
            other => other,
        }
    }
}

#[async_trait]
impl TrendsConnector for GoogleTrendsConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Google Trends"
    }

    fn as_interest_provider(&self) -> Option<&dyn InterestOverTimeProvider> {
        Some(self as &dyn InterestOverTimeProvider)
    }
}

#[async_trait]
impl InterestOverTimeProvider for GoogleTrendsConnector {
    async fn interest_over_time(&self, req: &TrendsRequest) -> Result<RawSeries, TrendsError> {
        if req.keywords.is_empty() || req.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(TrendsError::InvalidArg("keywords must be non-empty".into()));
        }
        let what = format!("interest over time for {:?} ({})", req.keywords, req.timeframe);
        let widget = self
            .api
            .explore(req)
            .await
            .map_err(|e| Self::normalize_error(e, &what))?
            .into_iter()
            .find(|w| w.id == TIMESERIES_WIDGET)
            .ok_or_else(|| TrendsError::not_found(format!("{TIMESERIES_WIDGET} widget for {what}")))?;
        self.api
            .multiline(&widget)
            .await
            .map_err(|e| Self::normalize_error(e, &what))
    }
}
