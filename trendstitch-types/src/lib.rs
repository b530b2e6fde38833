//! trendstitch-specific data transfer objects, configuration primitives and errors.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;
mod middleware;
mod query;
mod series;

pub use config::{
    DEFAULT_DELTA_DAYS, DEFAULT_OVERLAP_DAYS, MAX_DAILY_WINDOW_DAYS, Method, RetryConfig,
    StitchConfig,
};
pub use connector::ConnectorKey;
pub use error::TrendsError;
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use query::{Property, Timeframe, TrendQuery, TrendsRequest};
pub use series::{DailyTrend, RawSeries, TimelinePoint, TrendPoint};
