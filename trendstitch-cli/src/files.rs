use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::NaiveDate;
use trendstitch::{DailySeries, DailyTrend};

/// Dated values read back from a CSV file written by this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFile {
    /// Header of the value column, i.e. the keyword.
    pub keyword: String,
    /// One `(date, value)` per row, in file order.
    pub points: Vec<(NaiveDate, f64)>,
}

/// `{dir}/{keyword}_overlapping.csv`
#[must_use]
pub fn overlapping_path(dir: &Path, keyword: &str) -> PathBuf {
    dir.join(format!("{keyword}_overlapping.csv"))
}

/// `{dir}/{keyword}_daily.csv`
#[must_use]
pub fn daily_path(dir: &Path, keyword: &str) -> PathBuf {
    dir.join(format!("{keyword}_daily.csv"))
}

/// `{dir}/{keyword}_weekly.csv`
#[must_use]
pub fn weekly_path(dir: &Path, keyword: &str) -> PathBuf {
    dir.join(format!("{keyword}_weekly.csv"))
}

/// Write a stitched trend with the columns `date,{keyword},overlap`.
///
/// The overlap column holds `1` for days that went through an overlap
/// adjustment and `0` otherwise.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_stitched(path: &Path, trend: &DailyTrend) -> anyhow::Result<()> {
    let mut w = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["date", trend.keyword.as_str(), "overlap"])?;
    for p in &trend.points {
        w.write_record([
            p.date.format("%Y-%m-%d").to_string(),
            p.value.to_string(),
            u8::from(p.overlap).to_string(),
        ])?;
    }
    w.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write a plain series with the columns `date,{keyword}`. Weekly pulls use
/// it too, with one row per week start.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_daily(path: &Path, keyword: &str, series: &DailySeries) -> anyhow::Result<()> {
    let mut w = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["date", keyword])?;
    for (date, value) in series.iter() {
        w.write_record([date.format("%Y-%m-%d").to_string(), value.to_string()])?;
    }
    w.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read the first two columns of a file written by [`write_stitched`] or
/// [`write_daily`]. Extra columns are ignored.
///
/// # Errors
/// Fails on a missing file, a header with fewer than two columns, or a row
/// whose date or value does not parse.
pub fn read_series(path: &Path) -> anyhow::Result<SeriesFile> {
    let mut r = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = r.headers()?.clone();
    let Some(keyword) = headers.get(1) else {
        bail!("{}: expected a date column and a value column", path.display());
    };
    let keyword = keyword.to_string();

    let mut points = Vec::new();
    for (i, record) in r.records().enumerate() {
        let record = record.with_context(|| format!("{}: row {}", path.display(), i + 1))?;
        let (Some(date), Some(value)) = (record.get(0), record.get(1)) else {
            bail!("{}: row {} is short", path.display(), i + 1);
        };
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .with_context(|| format!("{}: bad date '{date}'", path.display()))?;
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("{}: bad value '{value}'", path.display()))?;
        points.push((date, value));
    }
    Ok(SeriesFile { keyword, points })
}
