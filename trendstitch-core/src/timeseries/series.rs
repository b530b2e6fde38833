use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;

use crate::TrendsError;

/// Ordered mapping from calendar day to observation, one value per day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    values: BTreeMap<NaiveDate, f64>,
}

impl DailySeries {
    /// Empty series.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Build a series from `(date, value)` pairs.
    ///
    /// # Errors
    /// Returns `TrendsError::Data` if a date appears more than once.
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, TrendsError>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut values = BTreeMap::new();
        for (date, value) in pairs {
            match values.entry(date) {
                Entry::Vacant(v) => {
                    v.insert(value);
                }
                Entry::Occupied(_) => {
                    return Err(TrendsError::Data(format!("duplicate observation for {date}")));
                }
            }
        }
        Ok(Self { values })
    }

    /// Insert or replace the value for `date`, returning the previous one.
    pub fn insert(&mut self, date: NaiveDate, value: f64) -> Option<f64> {
        self.values.insert(date, value)
    }

    /// Value recorded for `date`.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    /// Whether `date` has a value.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.values.contains_key(&date)
    }

    /// Remove the value for `date`.
    pub fn remove(&mut self, date: NaiveDate) -> Option<f64> {
        self.values.remove(&date)
    }

    /// Number of days with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no day has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Earliest day.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.values.keys().next().copied()
    }

    /// Latest day.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.keys().next_back().copied()
    }

    /// Ascending `(date, value)` pairs.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }

    /// Ascending days.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.values.keys().copied()
    }

    /// Pairs whose day lies in `[start, end]`. Empty when `start > end`.
    pub fn range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl DoubleEndedIterator<Item = (NaiveDate, f64)> + '_ {
        let bounds = if start <= end {
            Some(start..=end)
        } else {
            None
        };
        bounds
            .into_iter()
            .flat_map(move |r| self.values.range(r))
            .map(|(d, v)| (*d, *v))
    }

    /// Copy of the days in `[start, end]`.
    #[must_use]
    pub fn restrict(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            values: self.range(start, end).collect(),
        }
    }

    /// Multiply every value by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in self.values.values_mut() {
            *v *= factor;
        }
    }

    /// Round every value to the nearest integer, halves to even.
    pub fn round(&mut self) {
        for v in self.values.values_mut() {
            *v = v.round_ties_even();
        }
    }

    /// Largest value.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.values.values().copied().reduce(f64::max)
    }
}

impl FromIterator<(NaiveDate, f64)> for DailySeries {
    /// Later pairs overwrite earlier ones for the same day.
    fn from_iter<T: IntoIterator<Item = (NaiveDate, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Per-day marker of whether a value was adjusted through an overlap coefficient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSeries {
    flags: BTreeMap<NaiveDate, bool>,
}

impl FlagSeries {
    /// Empty flag series.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flags: BTreeMap::new(),
        }
    }

    /// All-false flags over the days of `series`.
    #[must_use]
    pub fn skeleton(series: &DailySeries) -> Self {
        Self {
            flags: series.dates().map(|d| (d, false)).collect(),
        }
    }

    /// Set every existing day in `[start, end]` to true.
    pub fn mark(&mut self, start: NaiveDate, end: NaiveDate) {
        if start > end {
            return;
        }
        for (_, flag) in self.flags.range_mut(start..=end) {
            *flag = true;
        }
    }

    /// Combine `flag` into the entry for `date` by logical OR, creating it if absent.
    pub fn merge_or(&mut self, date: NaiveDate, flag: bool) {
        let entry = self.flags.entry(date).or_insert(false);
        *entry |= flag;
    }

    /// Flag recorded for `date`.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.flags.get(&date).copied()
    }

    /// Number of days tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True when no day is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Ascending `(date, flag)` pairs.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, bool)> + '_ {
        self.flags.iter().map(|(d, f)| (*d, *f))
    }

    /// Number of days flagged true.
    #[must_use]
    pub fn count_marked(&self) -> usize {
        self.flags.values().filter(|f| **f).count()
    }
}
