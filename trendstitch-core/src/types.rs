//! Re-export of foundational types from `trendstitch-types`.
// Consolidated re-exports so downstream crates can depend on `trendstitch-core` only

pub use trendstitch_types::{
    ConnectorKey, DEFAULT_DELTA_DAYS, DEFAULT_OVERLAP_DAYS, MAX_DAILY_WINDOW_DAYS, Method,
    MiddlewareLayer, MiddlewareStack, Property, RetryConfig, StitchConfig, Timeframe,
    TrendQuery, TrendsError, TrendsRequest,
};

pub use trendstitch_types::{DailyTrend, RawSeries, TimelinePoint, TrendPoint};
