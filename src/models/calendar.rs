// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly and monthly calendar grids over the recorded days.

use crate::models::RecordedDates;
use crate::time_utils::format_iso_date;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Column headers, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CalendarMode {
    #[default]
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarCell {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Day of month to display.
    pub day: u32,
    pub is_today: bool,
    pub has_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarView {
    pub mode: CalendarMode,
    pub title: String,
    pub weekday_labels: Vec<String>,
    /// Weekday column (0 = Sunday) of the first cell.
    pub first_column: u32,
    pub cells: Vec<CalendarCell>,
}

/// Build the grid for `mode` around `today`.
///
/// Switching modes only needs the same `dates` again; nothing is re-fetched.
pub fn build_calendar(mode: CalendarMode, today: NaiveDate, dates: &RecordedDates) -> CalendarView {
    let (title, first, len) = match mode {
        CalendarMode::Weekly => {
            let back = u64::from(today.weekday().num_days_from_sunday());
            let sunday = today.checked_sub_days(Days::new(back)).unwrap_or(today);
            ("本週進度".to_string(), sunday, 7)
        }
        CalendarMode::Monthly => {
            let first = today.with_day(1).unwrap_or(today);
            (format!("{}月", today.month()), first, days_in_month(first))
        }
    };

    let cells = first
        .iter_days()
        .take(len as usize)
        .map(|date| CalendarCell {
            date: format_iso_date(date),
            day: date.day(),
            is_today: date == today,
            has_data: dates.contains(date),
        })
        .collect();

    CalendarView {
        mode,
        title,
        weekday_labels: WEEKDAY_LABELS.iter().map(|s| s.to_string()).collect(),
        first_column: first.weekday().num_days_from_sunday(),
        cells,
    }
}

/// Number of days in the month containing `first_of_month`.
fn days_in_month(first_of_month: NaiveDate) -> u32 {
    first_of_month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}
