use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the trendstitch workspace.
///
/// Variants fall into four classes: transient fetch failures (`RateLimited`),
/// configuration failures (`InvalidArg`), data-availability failures
/// (`DataUnavailable`) and arithmetic failures (`UndefinedCoefficient`).
/// The remaining variants carry adapter-level problems.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrendsError {
    /// Invalid input argument or configuration, rejected before any fetch.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The provider throttled the request.
    #[error("rate limited: retry_after_ms={retry_after_ms:?}")]
    RateLimited {
        /// Provider hint for how long to wait, when one was supplied.
        retry_after_ms: Option<u64>,
    },

    /// Rate-limit retries ran out; carries the last failure seen.
    #[error("giving up after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Total number of attempts made, including the first call.
        attempts: u32,
        /// The error returned by the final attempt.
        last: Box<TrendsError>,
    },

    /// Required data is missing (empty window, empty overlap, gap in range).
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// A scale coefficient could not be computed (zero denominator, non-positive ratio).
    #[error("undefined coefficient: {0}")]
    UndefinedCoefficient(String),

    /// Issues with the returned payload (malformed body, duplicate dates, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "timeseries widget for iphone".
        what: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl TrendsError {
    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `DataUnavailable` error.
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    /// Helper: build an `UndefinedCoefficient` error.
    pub fn undefined_coefficient(msg: impl Into<String>) -> Self {
        Self::UndefinedCoefficient(msg.into())
    }

    /// Returns true for failures worth retrying after a pause.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Returns true for failures raised by configuration validation.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidArg(_))
    }

    /// Unwrap `RetriesExhausted` to the innermost failure.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::RetriesExhausted { last, .. } => last.root_cause(),
            other => other,
        }
    }
}

impl From<chrono::ParseError> for TrendsError {
    fn from(e: chrono::ParseError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}

impl From<serde_json::Error> for TrendsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Data(e.to_string())
    }
}

#[cfg(feature = "dataframe")]
impl From<polars::prelude::PolarsError> for TrendsError {
    fn from(e: polars::prelude::PolarsError) -> Self {
        Self::Data(e.to_string())
    }
}
