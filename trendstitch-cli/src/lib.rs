//! Building blocks of the `trendstitch` binary: CSV files on disk and the
//! statistics printed by `trendstitch compare`.

pub mod compare;
pub mod files;
