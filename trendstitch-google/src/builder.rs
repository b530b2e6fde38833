use std::sync::Arc;

use trendstitch_core::connector::TrendsConnector;
use trendstitch_core::{RetryConfig, TrendsError};
use trendstitch_middleware::ConnectorBuilder as GenericConnectorBuilder;

use crate::{GoogleTrendsConfig, GoogleTrendsConnector};

/// Builder type alias specialized for Google Trends connectors.
pub type GoogleTrendsBuilder = GenericConnectorBuilder;

impl GoogleTrendsConnector {
    /// Returns an unconfigured builder around the default connector.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn builder(config: GoogleTrendsConfig) -> Result<GoogleTrendsBuilder, TrendsError> {
        let raw: Arc<dyn TrendsConnector> = Arc::new(Self::try_new(config)?);
        Ok(GenericConnectorBuilder::new(raw))
    }

    /// Returns a builder that retries rate-limited calls three times,
    /// waiting 60, 65 and 70 seconds.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn rate_limited(config: GoogleTrendsConfig) -> Result<GoogleTrendsBuilder, TrendsError> {
        Ok(Self::builder(config)?.with_retry(&RetryConfig::default()))
    }
}
