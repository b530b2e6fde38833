//! trendstitch-core
//!
//! Core traits and algorithms shared across the trendstitch ecosystem.
//!
//! - `connector`: the `TrendsConnector` trait and the interest-over-time capability.
//! - `middleware`: the trait implemented by connector wrappers.
//! - `timeseries`: daily series containers, the window planner, the overlap
//!   coefficient, hourly resampling and the column collapse used by stitching.
//!
//! Everything under `timeseries` is pure and synchronous; only connectors
//! perform I/O.
#![warn(missing_docs)]

/// Connector capability traits and the primary `TrendsConnector` interface.
pub mod connector;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
/// Time-series utilities for planning, scaling and merging windows.
pub mod timeseries;
pub mod types;

pub use connector::{InterestOverTimeProvider, TrendsConnector};
pub use middleware::Middleware;
pub use timeseries::coefficient::coefficient;
pub use timeseries::collapse::{WindowColumn, collapse_columns};
pub use timeseries::resample::{DailyRollup, HOURS_PER_DAY, daily_from_timeline, resample_hourly_to_daily};
pub use timeseries::series::{DailySeries, FlagSeries};
pub use timeseries::window::{PlannedWindow, Window, WindowPlan, plan_windows};
pub use types::*;
