//! Configuration types shared across the orchestrator and connectors.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::TrendsError;

/// Longest window (in days) the provider still serves at daily resolution.
pub const MAX_DAILY_WINDOW_DAYS: u32 = 269;

/// Default window length in days.
pub const DEFAULT_DELTA_DAYS: u32 = 269;

/// Default overlap between consecutive windows in days.
pub const DEFAULT_OVERLAP_DAYS: u32 = 100;

/// Statistic used to derive the scale coefficient over an overlap range.
///
/// The method also selects how overlapping window columns are collapsed:
/// `Max` and `Min` average every column that defines a date, while `Mean`
/// and `Sum` keep the value of the earliest-added column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Ratio of the overlap maxima.
    #[default]
    Max,
    /// Ratio of the overlap minima.
    Min,
    /// Mean of the pointwise ratios over the overlap.
    Mean,
    /// Ratio of the overlap sums.
    Sum,
}

impl Method {
    /// All supported methods, in declaration order.
    pub const ALL: [Self; 4] = [Self::Max, Self::Min, Self::Mean, Self::Sum];

    /// Lowercase name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Max => "max",
            Self::Min => "min",
            Self::Mean => "mean",
            Self::Sum => "sum",
        }
    }

    /// Whether overlapping columns are blended by averaging on collapse.
    #[must_use]
    pub const fn averages_columns(self) -> bool {
        matches!(self, Self::Max | Self::Min)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = TrendsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Self::Max),
            "min" => Ok(Self::Min),
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            other => Err(TrendsError::InvalidArg(format!(
                "unknown method '{other}', expected one of max, min, mean, sum"
            ))),
        }
    }
}

/// Parameters of a stitching run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StitchConfig {
    /// Length of each fetched window in days. Must not exceed [`MAX_DAILY_WINDOW_DAYS`].
    pub delta_days: u32,
    /// Days shared by consecutive windows. Must satisfy `0 < overlap_days < delta_days`.
    pub overlap_days: u32,
    /// Coefficient and collapse method.
    pub method: Method,
    /// Pause inserted after every window fetch.
    pub sleep: Duration,
    /// Raise progress narration from `debug` to `info`.
    pub verbose: bool,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            delta_days: DEFAULT_DELTA_DAYS,
            overlap_days: DEFAULT_OVERLAP_DAYS,
            method: Method::default(),
            sleep: Duration::ZERO,
            verbose: false,
        }
    }
}

impl StitchConfig {
    /// Check window geometry.
    ///
    /// # Errors
    /// Returns `TrendsError::InvalidArg` when `overlap_days` is zero or not
    /// strictly below `delta_days`, or when `delta_days` exceeds the
    /// provider's daily-resolution limit.
    pub fn validate(&self) -> Result<(), TrendsError> {
        if self.delta_days > MAX_DAILY_WINDOW_DAYS {
            return Err(TrendsError::InvalidArg(format!(
                "delta of {} days exceeds the daily-resolution limit of {MAX_DAILY_WINDOW_DAYS} days",
                self.delta_days
            )));
        }
        if self.overlap_days == 0 {
            return Err(TrendsError::InvalidArg("overlap must be positive".into()));
        }
        if self.overlap_days >= self.delta_days {
            return Err(TrendsError::InvalidArg(format!(
                "overlap ({}) must be smaller than delta ({})",
                self.overlap_days, self.delta_days
            )));
        }
        Ok(())
    }

    /// Days between the ends of consecutive windows.
    #[must_use]
    pub const fn step_days(&self) -> u32 {
        self.delta_days.saturating_sub(self.overlap_days)
    }
}

/// Bounded retry policy applied to rate-limited fetches.
///
/// The delay before retry `n` (zero-based) is `base_delay + step_delay * n`,
/// plus up to `jitter_percent` percent of random jitter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Extra delay added per previous retry.
    pub step_delay: Duration,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(60),
            step_delay: Duration::from_secs(5),
            jitter_percent: 0,
        }
    }
}

impl RetryConfig {
    /// Delay before the zero-based retry `attempt`, without jitter.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_add(self.step_delay.saturating_mul(attempt))
    }
}
