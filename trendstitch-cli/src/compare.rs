use std::collections::BTreeMap;
use std::fmt;

use anyhow::bail;
use chrono::NaiveDate;

/// Agreement between a direct daily pull and a stitched series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    /// Days present in both series.
    pub days: usize,
    /// Mean of the direct daily values.
    pub daily_mean: f64,
    /// Mean of the stitched values after rescaling.
    pub stitched_mean: f64,
    /// Mean of the per-day average of both series.
    pub overall_mean: f64,
    /// Mean absolute difference between the two series.
    pub mean_abs_diff: f64,
    /// Mean of `|daily - stitched| / per-day average`, in percent.
    /// Days where both series are zero are skipped.
    pub mean_abs_diff_pct: f64,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Days compared: {}", self.days)?;
        writeln!(f, "Mean value daily: {:.2}", self.daily_mean)?;
        writeln!(f, "Mean value overlap: {:.2}", self.stitched_mean)?;
        writeln!(f, "Mean value overall: {:.2}", self.overall_mean)?;
        writeln!(f, "Average difference: {:.2}", self.mean_abs_diff)?;
        write!(
            f,
            "Average difference % from mean value overall: {:.2}%",
            self.mean_abs_diff_pct
        )
    }
}

/// Compare `stitched` against `daily` over the daily series' date range.
///
/// The stitched series is first cut to the range of `daily` and rescaled so
/// its maximum inside that range is 100.
///
/// # Errors
/// Fails when `daily` is empty or the two series share no date.
#[allow(clippy::cast_precision_loss)]
pub fn compare(
    daily: &[(NaiveDate, f64)],
    stitched: &[(NaiveDate, f64)],
) -> anyhow::Result<Comparison> {
    let daily: BTreeMap<NaiveDate, f64> = daily.iter().copied().collect();
    let (Some(&first), Some(&last)) = (daily.keys().next(), daily.keys().next_back()) else {
        bail!("daily series is empty");
    };

    let mut cut: BTreeMap<NaiveDate, f64> = stitched
        .iter()
        .copied()
        .filter(|(d, _)| first <= *d && *d <= last)
        .collect();
    let max = cut.values().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for v in cut.values_mut() {
            *v = *v / max * 100.0;
        }
    }

    let pairs: Vec<(f64, f64)> = daily
        .iter()
        .filter_map(|(d, a)| cut.get(d).map(|b| (*a, *b)))
        .collect();
    if pairs.is_empty() {
        bail!("series share no date between {first} and {last}");
    }

    let n = pairs.len() as f64;
    let mut pct_total = 0.0;
    let mut pct_days = 0usize;
    for &(a, b) in &pairs {
        let mid = (a + b) / 2.0;
        if mid != 0.0 {
            pct_total += (a - b).abs() / mid;
            pct_days += 1;
        }
    }
    let mean_abs_diff_pct = if pct_days == 0 {
        0.0
    } else {
        pct_total / pct_days as f64 * 100.0
    };

    Ok(Comparison {
        days: pairs.len(),
        daily_mean: pairs.iter().map(|p| p.0).sum::<f64>() / n,
        stitched_mean: pairs.iter().map(|p| p.1).sum::<f64>() / n,
        overall_mean: pairs.iter().map(|p| (p.0 + p.1) / 2.0).sum::<f64>() / n,
        mean_abs_diff: pairs.iter().map(|p| (p.0 - p.1).abs()).sum::<f64>() / n,
        mean_abs_diff_pct,
    })
}
