use std::fmt;

use chrono::{Days, NaiveDate};

use crate::{StitchConfig, Timeframe, TrendsError};

/// Closed date interval `[start, end]` fetched by one connector call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

impl Window {
    /// Construct a window; callers keep `start <= end`.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Provider timeframe covering this window.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        Timeframe::dates(self.start, self.end)
    }

    /// Whether `date` lies inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `end - start` in days.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// One step of a [`WindowPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedWindow {
    /// Zero-based position, latest window first.
    pub index: usize,
    /// Range to fetch.
    pub window: Window,
    /// Range shared with the previous (later) window; `None` for the first.
    ///
    /// Spans from the previous window's start to this window's end.
    pub overlap: Option<Window>,
}

/// Lazy, latest-first sequence of overlapping windows covering a date range.
///
/// The first window is `[end - delta, end]`; each following window is shifted
/// back by `delta - overlap` days. The plan ends with the first window whose
/// start is on or before the requested start, so the earliest window may
/// reach further back than requested.
#[derive(Debug, Clone)]
pub struct WindowPlan {
    start: NaiveDate,
    step_days: u64,
    next: Option<Window>,
    prev_start: Option<NaiveDate>,
    index: usize,
}

impl Iterator for WindowPlan {
    type Item = PlannedWindow;

    fn next(&mut self) -> Option<Self::Item> {
        let window = self.next.take()?;
        let overlap = self.prev_start.map(|ps| Window::new(ps, window.end));

        if window.start > self.start {
            self.next = match (
                window.start.checked_sub_days(Days::new(self.step_days)),
                window.end.checked_sub_days(Days::new(self.step_days)),
            ) {
                (Some(s), Some(e)) => Some(Window::new(s, e)),
                _ => None,
            };
        }
        self.prev_start = Some(window.start);

        let planned = PlannedWindow {
            index: self.index,
            window,
            overlap,
        };
        self.index += 1;
        Some(planned)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(next) = self.next else {
            return (0, Some(0));
        };
        let behind = (next.start - self.start).num_days();
        let step = i64::try_from(self.step_days).unwrap_or(i64::MAX);
        let extra = if behind > 0 && step > 0 {
            usize::try_from((behind + step - 1) / step).unwrap_or(usize::MAX)
        } else {
            0
        };
        let total = extra.saturating_add(1);
        (total, Some(total))
    }
}

/// Plan the fetch windows for `[start, end]`.
///
/// # Errors
/// Returns `TrendsError::InvalidArg` when `start >= end` or when `cfg` fails
/// [`StitchConfig::validate`].
pub fn plan_windows(
    start: NaiveDate,
    end: NaiveDate,
    cfg: &StitchConfig,
) -> Result<WindowPlan, TrendsError> {
    cfg.validate()?;
    if start >= end {
        return Err(TrendsError::InvalidArg(format!(
            "start ({start}) must be before end ({end})"
        )));
    }
    let first_start = end
        .checked_sub_days(Days::new(u64::from(cfg.delta_days)))
        .ok_or_else(|| TrendsError::InvalidArg(format!("window before {end} is out of range")))?;

    Ok(WindowPlan {
        start,
        step_days: u64::from(cfg.step_days()),
        next: Some(Window::new(first_start, end)),
        prev_start: None,
        index: 0,
    })
}
