// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily practices that turn user input into diary entries.

use crate::models::DiaryEntry;
use rand::seq::SliceRandom;
use rand::Rng;

/// Times an affirmation is written before it is sent.
pub const NIGHTLY_REPETITIONS: u32 = 3;

/// Reflection stored when the gratitude envelope is sealed.
pub const GRATITUDE_REFLECTION: &str = "今日收悉一份感謝能量";

/// Title of a photo moment.
pub const LIFE_MOMENT_AFFIRMATION: &str = "今日美好瞬間";

/// Small decluttering tasks; a few are offered each day.
pub const SPACE_CLEARING_TASKS: [&str; 8] = [
    "清理錢包收據",
    "整理書桌 3 樣雜物",
    "刪除 1 個沒用的 App",
    "把鈔票整理整齊",
    "清理電子郵件垃圾箱",
    "刪除手機中 5 張不需要的照片",
    "清潔電腦鍵盤或手機螢幕",
    "處理掉一件過期或不再需要的雜物",
];

/// Tasks offered per day.
pub const DAILY_CLEARING_TASKS: usize = 3;

/// Dopamine-detox checklist.
pub const DOPAMINE_DETOX_TASKS: [&str; 3] = [
    "不滑社交平台、短影片",
    "少吃甜食、炸物、垃圾食物",
    "12:00前睡覺",
];

/// Draw today's distinct space-clearing tasks.
pub fn pick_clearing_tasks<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    SPACE_CLEARING_TASKS
        .choose_multiple(rng, DAILY_CLEARING_TASKS)
        .copied()
        .collect()
}

/// Progress of the nightly writing ritual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RitualStep {
    /// Blank input; nothing counted.
    Ignored,
    /// Written `n` of [`NIGHTLY_REPETITIONS`] times.
    Written(u32),
    /// Final repetition; the entry is ready to sync.
    Complete(DiaryEntry),
}

/// Nightly affirmation writing: the text is written three times, and the
/// third writing is what gets recorded.
#[derive(Debug, Default)]
pub struct NightlyRitual {
    count: u32,
}

impl NightlyRitual {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn write(&mut self, text: &str) -> RitualStep {
        let text = text.trim();
        if text.is_empty() || self.count >= NIGHTLY_REPETITIONS {
            return RitualStep::Ignored;
        }

        self.count += 1;
        if self.count == NIGHTLY_REPETITIONS {
            RitualStep::Complete(DiaryEntry::nightly_writing(text))
        } else {
            RitualStep::Written(self.count)
        }
    }

    /// Allow another attempt after a failed sync.
    pub fn retry(&mut self) {
        self.count = NIGHTLY_REPETITIONS - 1;
    }
}

/// Happy-things entry, or `None` when every input is blank.
pub fn happy_things_entry(inputs: [&str; 3]) -> Option<DiaryEntry> {
    if inputs.iter().all(|s| s.trim().is_empty()) {
        return None;
    }
    Some(DiaryEntry::happy_things(inputs))
}

/// Gratitude envelope entry.
pub fn gratitude_entry() -> DiaryEntry {
    DiaryEntry::gratitude(GRATITUDE_REFLECTION)
}
