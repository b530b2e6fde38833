use std::collections::BTreeMap;

use crate::Method;
use crate::timeseries::series::{DailySeries, FlagSeries};
use crate::timeseries::window::Window;

/// Scaled values and overlap flags produced by one fetched window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowColumn {
    /// Window the column was fetched for.
    pub window: Window,
    /// Values after coefficient scaling.
    pub values: DailySeries,
    /// True for days inside the overlap with the previous column.
    pub flags: FlagSeries,
}

impl WindowColumn {
    /// Unscaled column with every flag false.
    #[must_use]
    pub fn seed(window: Window, values: DailySeries) -> Self {
        let flags = FlagSeries::skeleton(&values);
        Self {
            window,
            values,
            flags,
        }
    }
}

/// Merge columns, given in fetch order, into one value and one flag per day.
///
/// `Max` and `Min` average every column that defines a day. `Mean` and `Sum`
/// take the value from the earliest-added column defining the day. Flags are
/// combined with logical OR.
#[must_use]
pub fn collapse_columns(columns: &[WindowColumn], method: Method) -> (DailySeries, FlagSeries) {
    let mut flags = FlagSeries::new();
    for column in columns {
        for (date, flag) in column.flags.iter() {
            flags.merge_or(date, flag);
        }
    }

    let values = if method.averages_columns() {
        average(columns)
    } else {
        first_writer(columns)
    };
    (values, flags)
}

#[allow(clippy::cast_precision_loss)]
fn average(columns: &[WindowColumn]) -> DailySeries {
    let mut acc: BTreeMap<_, (f64, usize)> = BTreeMap::new();
    for column in columns {
        for (date, value) in column.values.iter() {
            let slot = acc.entry(date).or_insert((0.0, 0));
            slot.0 += value;
            slot.1 += 1;
        }
    }
    acc.into_iter()
        .map(|(date, (sum, n))| (date, sum / n as f64))
        .collect()
}

fn first_writer(columns: &[WindowColumn]) -> DailySeries {
    let mut out = DailySeries::new();
    for column in columns {
        for (date, value) in column.values.iter() {
            if !out.contains(date) {
                out.insert(date, value);
            }
        }
    }
    out
}
