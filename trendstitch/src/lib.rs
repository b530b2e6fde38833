//! trendstitch rebuilds a long, continuous daily interest series for one
//! keyword from a trends provider that only serves daily resolution for short
//! windows.
//!
//! Overview
//! - Plans overlapping windows backward from the end date and fetches them in
//!   sequence through any `TrendsConnector`.
//! - Rescales each window onto the previous one with an overlap coefficient
//!   (`max`, `min`, `mean` or `sum`) and collapses the columns into one series.
//! - Splices in the last few days from hourly data when daily data lags behind.
//! - Rescales the final range so its maximum is 100 and reports, per day,
//!   whether the value went through an overlap adjustment.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use trendstitch::{Method, TrendQuery, TrendStitcher};
//! use trendstitch_google::{GoogleTrendsConfig, GoogleTrendsConnector};
//!
//! let conn = GoogleTrendsConnector::rate_limited(GoogleTrendsConfig::default())?.build();
//! let stitcher = TrendStitcher::builder()
//!     .with_connector(conn)
//!     .method(Method::Max)
//!     .build()?;
//! let trend = stitcher
//!     .daily_trend(
//!         &TrendQuery::new("iphone").geo("US"),
//!         NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2020, 10, 15).unwrap(),
//!     )
//!     .await?;
//! ```
#![warn(missing_docs)]

#[macro_use]
mod macros;
mod core;
mod stitch;

pub use crate::core::{TrendStitcher, TrendStitcherBuilder};
pub use trendstitch_core::{
    DailySeries, FlagSeries, Method, Property, RetryConfig, StitchConfig, Timeframe, TrendQuery,
    TrendsConnector, TrendsError,
};
pub use trendstitch_middleware::{ConnectorBuilder, RetryingConnector};
pub use trendstitch_types::{DailyTrend, TrendPoint};
