// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notion API wire shapes used by the diary client.
//!
//! Property values follow Notion's per-type envelopes (`title`, `rich_text`,
//! `select`, `date`, `url`); the property names match the diary database.

use crate::models::DiaryEntry;
use serde::{Deserialize, Serialize};

/// Property names in the diary database.
pub mod properties {
    pub const AFFIRMATION: &str = "Affirmation";
    pub const CATEGORY: &str = "Category";
    pub const HAPPY_THINGS: &str = "Happy Things";
    pub const DATE: &str = "Date";
    pub const IMAGE: &str = "Image";
}

/// Body of `POST /pages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePageRequest {
    pub parent: Parent,
    pub properties: DiaryProperties,
}

/// Page parent. `database_id` is omitted when unknown so the proxy can fill it.
#[derive(Debug, Clone, Serialize)]
pub struct Parent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiaryProperties {
    #[serde(rename = "Affirmation")]
    pub affirmation: TitleProperty,
    #[serde(rename = "Category")]
    pub category: SelectProperty,
    #[serde(rename = "Happy Things")]
    pub happy_things: RichTextProperty,
    #[serde(rename = "Date")]
    pub date: DateProperty,
    #[serde(rename = "Image", skip_serializing_if = "Option::is_none")]
    pub image: Option<UrlProperty>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleProperty {
    pub title: Vec<TextItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RichTextProperty {
    pub rich_text: Vec<TextItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextItem {
    pub text: TextContent,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectProperty {
    pub select: SelectOption,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateProperty {
    pub date: Option<DateValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateValue {
    pub start: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlProperty {
    pub url: String,
}

fn text(content: impl Into<String>) -> Vec<TextItem> {
    vec![TextItem {
        text: TextContent {
            content: content.into(),
        },
    }]
}

impl CreatePageRequest {
    /// Build the create-page body for an entry recorded on `date` (`YYYY-MM-DD`).
    pub fn from_entry(entry: &DiaryEntry, database_id: Option<&str>, date: &str) -> Self {
        Self {
            parent: Parent {
                database_id: database_id.map(str::to_string),
            },
            properties: DiaryProperties {
                affirmation: TitleProperty {
                    title: text(entry.title()),
                },
                category: SelectProperty {
                    select: SelectOption {
                        name: entry.category.label().to_string(),
                    },
                },
                happy_things: RichTextProperty {
                    rich_text: text(entry.happy_things_text()),
                },
                date: DateProperty {
                    date: Some(DateValue {
                        start: Some(date.to_string()),
                    }),
                },
                image: entry
                    .image_url
                    .as_ref()
                    .map(|url| UrlProperty { url: url.clone() }),
            },
        }
    }
}

/// Body of `POST /databases/{id}/query`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryDatabaseRequest {
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<QuerySort>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuerySort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Response of a database query. Only the parts the diary reads are modelled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryDatabaseResponse {
    #[serde(default)]
    pub results: Vec<PageSummary>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageSummary {
    #[serde(default)]
    pub properties: PageProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageProperties {
    #[serde(rename = "Date", default)]
    pub date: Option<DateProperty>,
}

impl PageSummary {
    /// The `Date` property's start value, if set.
    pub fn date_start(&self) -> Option<&str> {
        self.properties
            .date
            .as_ref()?
            .date
            .as_ref()?
            .start
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_page_envelopes() {
        let entry = DiaryEntry::happy_things(["coffee", "", "rain"]);
        let body = CreatePageRequest::from_entry(&entry, Some("db-1"), "2026-10-18");

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "parent": { "database_id": "db-1" },
                "properties": {
                    "Affirmation": { "title": [{ "text": { "content": "快樂小事" } }] },
                    "Category": { "select": { "name": "快樂小事" } },
                    "Happy Things": { "rich_text": [{ "text": { "content": "coffee\nrain" } }] },
                    "Date": { "date": { "start": "2026-10-18" } }
                }
            })
        );
    }

    #[test]
    fn test_create_page_omits_unknown_parent_and_adds_image() {
        let entry = DiaryEntry::life_moment("今日美好瞬間", "https://img.example/a.jpg");
        let body = serde_json::to_value(CreatePageRequest::from_entry(&entry, None, "2026-10-18"))
            .unwrap();

        assert_eq!(body["parent"], json!({}));
        assert_eq!(
            body["properties"][properties::IMAGE],
            json!({ "url": "https://img.example/a.jpg" })
        );
    }

    #[test]
    fn test_query_response_tolerates_missing_dates() {
        let response: QueryDatabaseResponse = serde_json::from_value(json!({
            "results": [
                { "properties": { "Date": { "date": { "start": "2026-10-01" } } } },
                { "properties": { "Date": { "date": null } } },
                { "properties": {} }
            ],
            "has_more": false,
            "next_cursor": null
        }))
        .unwrap();

        let dates: Vec<_> = response.results.iter().map(PageSummary::date_start).collect();
        assert_eq!(dates, vec![Some("2026-10-01"), None, None]);
    }
}
