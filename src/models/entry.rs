// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diary entry model: what a single user action records.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Maximum number of "happy things" kept per entry.
pub const MAX_HAPPY_THINGS: usize = 3;

/// Diary category. Serialized as the Notion select option name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Category {
    #[serde(rename = "夜間寫作")]
    NightlyWriting,
    #[serde(rename = "快樂小事")]
    HappyThings,
    #[serde(rename = "空間清理")]
    SpaceClearing,
    #[serde(rename = "已接收感謝")]
    GratitudeReceived,
    #[serde(rename = "多巴安戒斷")]
    DopamineDetox,
    #[serde(rename = "生活瞬間")]
    LifeMoment,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::NightlyWriting,
        Category::HappyThings,
        Category::SpaceClearing,
        Category::GratitudeReceived,
        Category::DopamineDetox,
        Category::LifeMoment,
    ];

    /// Label stored in the Notion `Category` select.
    pub fn label(self) -> &'static str {
        match self {
            Category::NightlyWriting => "夜間寫作",
            Category::HappyThings => "快樂小事",
            Category::SpaceClearing => "空間清理",
            Category::GratitudeReceived => "已接收感謝",
            Category::DopamineDetox => "多巴安戒斷",
            Category::LifeMoment => "生活瞬間",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single diary action, built on submit and dropped once synced.
///
/// Fields other than `category` only make sense for some categories, so
/// entries are built through the per-category constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affirmation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub happy_things: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflections: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clearing_task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl DiaryEntry {
    fn empty(category: Category) -> Self {
        Self {
            category,
            affirmation: None,
            happy_things: None,
            reflections: None,
            clearing_task: None,
            image_url: None,
        }
    }

    /// Nightly affirmation writing.
    pub fn nightly_writing(affirmation: impl Into<String>) -> Self {
        Self {
            affirmation: Some(affirmation.into()),
            ..Self::empty(Category::NightlyWriting)
        }
    }

    /// Up to three small things that made today good. Extra items are dropped.
    pub fn happy_things<I, S>(things: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let things = things
            .into_iter()
            .take(MAX_HAPPY_THINGS)
            .map(Into::into)
            .collect();
        Self {
            happy_things: Some(things),
            ..Self::empty(Category::HappyThings)
        }
    }

    /// Sealed gratitude envelope.
    pub fn gratitude(reflections: impl Into<String>) -> Self {
        Self {
            reflections: Some(reflections.into()),
            ..Self::empty(Category::GratitudeReceived)
        }
    }

    /// A completed space-clearing task.
    pub fn space_clearing(task: impl Into<String>) -> Self {
        let task = task.into();
        Self {
            affirmation: Some(completed_label(&task)),
            clearing_task: Some(task),
            ..Self::empty(Category::SpaceClearing)
        }
    }

    /// A completed dopamine-detox checklist item.
    pub fn dopamine_detox(task: &str) -> Self {
        Self {
            affirmation: Some(completed_label(task)),
            ..Self::empty(Category::DopamineDetox)
        }
    }

    /// A photo moment, recorded after the image has been uploaded.
    pub fn life_moment(affirmation: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            affirmation: Some(affirmation.into()),
            image_url: Some(image_url.into()),
            ..Self::empty(Category::LifeMoment)
        }
    }

    /// Title written to the page: the affirmation, else the category label.
    pub fn title(&self) -> &str {
        self.affirmation
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(self.category.label())
    }

    /// Non-blank happy things joined one per line.
    pub fn happy_things_text(&self) -> String {
        self.happy_things
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn completed_label(task: &str) -> String {
    format!("已完成：{task}")
}
