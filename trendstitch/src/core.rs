use std::sync::Arc;
use std::time::Duration;

use trendstitch_core::connector::{InterestOverTimeProvider, TrendsConnector};
use trendstitch_core::{Method, StitchConfig, TrendsError};

/// Orchestrator that stitches daily windows fetched through one connector.
///
/// A run keeps its accumulated columns in local state, so one stitcher can
/// serve several keywords concurrently.
pub struct TrendStitcher {
    pub(crate) connector: Arc<dyn TrendsConnector>,
    pub(crate) cfg: StitchConfig,
}

/// Builder for constructing a [`TrendStitcher`].
#[derive(Default)]
pub struct TrendStitcherBuilder {
    connector: Option<Arc<dyn TrendsConnector>>,
    cfg: StitchConfig,
}

impl TrendStitcherBuilder {
    /// Builder with the default window layout (269-day windows, 100 days of
    /// overlap, `max` coefficient, no sleep).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector used for every fetch. Wrap it in retry middleware first when
    /// talking to a live service.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn TrendsConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Replace the whole stitching configuration.
    #[must_use]
    pub fn config(mut self, cfg: StitchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Window length in days.
    #[must_use]
    pub const fn delta_days(mut self, days: u32) -> Self {
        self.cfg.delta_days = days;
        self
    }

    /// Days shared by consecutive windows.
    #[must_use]
    pub const fn overlap_days(mut self, days: u32) -> Self {
        self.cfg.overlap_days = days;
        self
    }

    /// Statistic used for the overlap coefficient and the column collapse.
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.cfg.method = method;
        self
    }

    /// Pause after every window fetch.
    #[must_use]
    pub const fn sleep(mut self, pause: Duration) -> Self {
        self.cfg.sleep = pause;
        self
    }

    /// Log progress at `info` instead of `debug`.
    #[must_use]
    pub const fn verbose(mut self, yes: bool) -> Self {
        self.cfg.verbose = yes;
        self
    }

    /// Build the stitcher.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector was registered or the window
    /// configuration is inconsistent.
    pub fn build(self) -> Result<TrendStitcher, TrendsError> {
        let connector = self.connector.ok_or_else(|| {
            TrendsError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            )
        })?;
        self.cfg.validate()?;
        Ok(TrendStitcher {
            connector,
            cfg: self.cfg,
        })
    }
}

impl TrendStitcher {
    /// Start building a new stitcher.
    #[must_use]
    pub fn builder() -> TrendStitcherBuilder {
        TrendStitcherBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &StitchConfig {
        &self.cfg
    }

    pub(crate) fn provider(&self) -> Result<&dyn InterestOverTimeProvider, TrendsError> {
        self.connector.as_interest_provider().ok_or_else(|| {
            TrendsError::connector(self.connector.name(), "missing interest-over-time capability")
        })
    }
}
