// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recorded journaling days and the "current streak" derived from them.

use crate::time_utils::{format_iso_date, parse_iso_date};
use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

/// How far back the streak scan looks, in days.
pub const STREAK_LOOKBACK_DAYS: u64 = 365;

/// Set of calendar days with at least one diary entry.
///
/// Always derived from a query response; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedDates(BTreeSet<NaiveDate>);

impl RecordedDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect dates from raw `YYYY-MM-DD` strings. Unparseable values are skipped.
    pub fn from_strings<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .filter_map(|s| parse_iso_date(s.as_ref()))
            .collect()
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn oldest(&self) -> Option<NaiveDate> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }

    /// Dates as unique `YYYY-MM-DD` strings, oldest first.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().copied().map(format_iso_date).collect()
    }
}

impl FromIterator<NaiveDate> for RecordedDates {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<NaiveDate> for RecordedDates {
    fn extend<T: IntoIterator<Item = NaiveDate>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

/// Outcome of walking backward from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakScan {
    /// Consecutive recorded days counted.
    pub days: u32,
    /// The missing day that ended the scan, or `None` if the lookback ran out.
    pub gap: Option<NaiveDate>,
}

/// Walk backward from `today` through at most [`STREAK_LOOKBACK_DAYS`] days.
///
/// A missing `today` is skipped (the user may not have journaled yet); any
/// other missing day ends the scan.
pub fn scan_streak(dates: &RecordedDates, today: NaiveDate) -> StreakScan {
    let mut days = 0;

    for offset in 0..STREAK_LOOKBACK_DAYS {
        let Some(day) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };

        if dates.contains(day) {
            days += 1;
        } else if offset == 0 {
            continue;
        } else {
            return StreakScan {
                days,
                gap: Some(day),
            };
        }
    }

    StreakScan { days, gap: None }
}

/// Current streak length in days.
pub fn compute_streak(dates: &RecordedDates, today: NaiveDate) -> u32 {
    scan_streak(dates, today).days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn days_ago(offsets: &[u64]) -> RecordedDates {
        offsets
            .iter()
            .map(|&o| today().checked_sub_days(Days::new(o)).unwrap())
            .collect()
    }

    #[test]
    fn test_streak_including_today() {
        assert_eq!(compute_streak(&days_ago(&[0, 1, 2]), today()), 3);
    }

    #[test]
    fn test_missing_today_does_not_break_streak() {
        assert_eq!(compute_streak(&days_ago(&[1, 2]), today()), 2);
        assert_eq!(compute_streak(&days_ago(&[1, 2, 3]), today()), 3);
    }

    #[test]
    fn test_gap_stops_scan() {
        let scan = scan_streak(&days_ago(&[1, 3]), today());
        assert_eq!(scan.days, 1);
        assert_eq!(scan.gap, NaiveDate::from_ymd_opt(2026, 2, 27));
    }

    #[test]
    fn test_empty_set_is_zero() {
        let scan = scan_streak(&RecordedDates::new(), today());
        assert_eq!(scan.days, 0);
        assert_eq!(scan.gap, NaiveDate::from_ymd_opt(2026, 2, 28));
    }

    #[test]
    fn test_streak_crosses_month_and_leap_boundaries() {
        // 2026-03-01 back through 2026-02-26
        assert_eq!(compute_streak(&days_ago(&[0, 1, 2, 3, 4]), today()), 5);
    }

    #[test]
    fn test_lookback_is_capped() {
        let all: Vec<u64> = (0..400).collect();
        let scan = scan_streak(&days_ago(&all), today());
        assert_eq!(scan.days as u64, STREAK_LOOKBACK_DAYS);
        assert_eq!(scan.gap, None);
    }

    #[test]
    fn test_from_strings_deduplicates() {
        let dates = RecordedDates::from_strings(["2026-02-28", "2026-02-28", "garbage", "2026-02-27"]);
        assert_eq!(dates.len(), 2);
        assert_eq!(dates.to_strings(), vec!["2026-02-27", "2026-02-28"]);
    }
}
