// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod calendar;
pub mod entry;
pub mod notion;
pub mod rituals;
pub mod streak;

pub use calendar::{build_calendar, CalendarCell, CalendarMode, CalendarView};
pub use entry::{Category, DiaryEntry};
pub use streak::{compute_streak, scan_streak, RecordedDates, StreakScan};
