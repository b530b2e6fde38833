//! Time-series utilities used by the stitching orchestrator.
//!
//! Modules include:
//! - `series`: date-keyed value and overlap-flag containers
//! - `window`: backward-marching plan of overlapping fetch windows
//! - `coefficient`: scale ratio between two series over an overlap range
//! - `resample`: timeline to daily conversion, including hourly roll-up
//! - `collapse`: merge per-window columns into one series
/// Overlap coefficient computation.
pub mod coefficient;
/// Column collapse policies.
pub mod collapse;
/// Timeline conversion and hourly-to-daily roll-up.
pub mod resample;
/// Daily value and flag series.
pub mod series;
/// Window planning.
pub mod window;
