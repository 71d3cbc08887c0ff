// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diary client: records entries and reads back recorded days through the
//! Notion proxy.
//!
//! Writes report an [`ActionResult`] and never fail the caller; reads degrade
//! to "no data" on any error. The presentation layer decides what to show.

use crate::config::Config;
use crate::models::notion::{
    properties, CreatePageRequest, QueryDatabaseRequest, QueryDatabaseResponse, QuerySort,
    SortDirection,
};
use crate::models::rituals::LIFE_MOMENT_AFFIRMATION;
use crate::models::{
    build_calendar, scan_streak, CalendarMode, CalendarView, DiaryEntry, RecordedDates,
};
use crate::services::CloudinaryClient;
use crate::time_utils::{format_iso_date, local_today};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// Records per query page (Notion's maximum).
pub const QUERY_PAGE_SIZE: u32 = 100;

/// Upper bound on pages fetched while looking for the end of a streak.
pub const MAX_STREAK_PAGES: u32 = 10;

/// Shown for 404s, almost always a wrong database ID or an unshared database.
pub const NOT_FOUND_HINT: &str = "Database not found. Check that 1. the database ID is correct 2. the integration has been added to the database under '...' > 'Connections'.";

/// Shown for 401s.
pub const UNAUTHORIZED_HINT: &str = "Notion rejected the API key. Check that the integration secret is correct.";

/// Placeholder sent when the client has no database ID; the proxy substitutes
/// its configured one.
const UNKNOWN_DATABASE_ID: &str = "undefined";

/// Outcome of a user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum ActionResult {
    Success,
    Failure(String),
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ActionResult::Success => None,
            ActionResult::Failure(message) => Some(message),
        }
    }
}

/// Client for the diary's proxy endpoints.
#[derive(Clone)]
pub struct DiaryClient {
    http: reqwest::Client,
    proxy_url: String,
    database_id: Option<String>,
    uploader: CloudinaryClient,
}

impl DiaryClient {
    /// `proxy_url` is the forwarder's base, e.g. `http://localhost:8080/api/notion`.
    pub fn new(proxy_url: impl Into<String>, database_id: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            proxy_url: proxy_url.into().trim_end_matches('/').to_string(),
            database_id,
            uploader: CloudinaryClient::new(None, None),
        }
    }

    /// Client using the configured database ID and Cloudinary settings.
    pub fn from_config(proxy_url: impl Into<String>, config: &Config) -> Self {
        Self::new(proxy_url, config.notion_database_id.clone())
            .with_uploader(CloudinaryClient::from_config(config))
    }

    /// Use `uploader` for photo moments.
    pub fn with_uploader(mut self, uploader: CloudinaryClient) -> Self {
        self.uploader = uploader;
        self
    }

    fn query_url(&self) -> String {
        let id = self.database_id.as_deref().unwrap_or(UNKNOWN_DATABASE_ID);
        format!("{}/databases/{}/query", self.proxy_url, id)
    }

    // ─── Writes ──────────────────────────────────────────────────

    /// Record an entry dated today (local time).
    pub async fn sync_entry(&self, entry: &DiaryEntry) -> ActionResult {
        self.sync_entry_on(entry, local_today()).await
    }

    /// Record an entry with an explicit date.
    pub async fn sync_entry_on(&self, entry: &DiaryEntry, date: NaiveDate) -> ActionResult {
        tracing::info!(category = %entry.category, "Syncing diary entry to Notion");

        let body =
            CreatePageRequest::from_entry(entry, self.database_id.as_deref(), &format_iso_date(date));
        let url = format!("{}/pages", self.proxy_url);

        let response = match self.http.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Diary sync request failed");
                return ActionResult::Failure(e.to_string());
            }
        };

        let status = response.status();
        if status.is_success() {
            return ActionResult::Success;
        }

        let text = response.text().await.unwrap_or_default();
        let message = failure_message(status.as_u16(), &text);
        tracing::error!(status = status.as_u16(), error = %message, "Diary sync failed");
        ActionResult::Failure(message)
    }

    /// Upload a photo and record it as today's life moment.
    pub async fn record_moment(&self, image: Vec<u8>, file_name: &str) -> ActionResult {
        let image_url = match self.uploader.upload_image(image, file_name).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, "Photo upload failed");
                return ActionResult::Failure(e.to_string());
            }
        };

        let entry = DiaryEntry::life_moment(LIFE_MOMENT_AFFIRMATION, image_url);
        self.sync_entry(&entry).await
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// Unique `YYYY-MM-DD` dates among the (up to) 100 records Notion returns
    /// by default. Empty on any failure.
    pub async fn fetch_recorded_dates(&self) -> Vec<String> {
        let request = QueryDatabaseRequest {
            page_size: QUERY_PAGE_SIZE,
            start_cursor: None,
            sorts: Vec::new(),
        };

        match self.query(&request).await {
            Some(page) => unique_dates(&page),
            None => Vec::new(),
        }
    }

    /// Current streak, paging back through records (newest first) until the
    /// streak's end is known or [`MAX_STREAK_PAGES`] have been read.
    pub async fn fetch_streak(&self, today: NaiveDate) -> u32 {
        let mut dates = RecordedDates::new();
        let mut cursor = None;

        for _ in 0..MAX_STREAK_PAGES {
            let request = QueryDatabaseRequest {
                page_size: QUERY_PAGE_SIZE,
                start_cursor: cursor.take(),
                sorts: vec![QuerySort {
                    property: properties::DATE.to_string(),
                    direction: SortDirection::Descending,
                }],
            };

            let Some(page) = self.query(&request).await else {
                break;
            };
            dates.extend(RecordedDates::from_strings(unique_dates(&page)).iter());

            // Records are newest first, so everything after the oldest date
            // seen so far is already here.
            let settled = match (scan_streak(&dates, today).gap, dates.oldest()) {
                (None, _) => true,
                (Some(gap), Some(oldest)) => gap > oldest,
                (Some(_), None) => true,
            };

            if settled || !page.has_more || page.next_cursor.is_none() {
                break;
            }
            cursor = page.next_cursor;
        }

        scan_streak(&dates, today).days
    }

    /// Calendar for `mode` built from the recorded dates.
    pub async fn fetch_calendar(&self, mode: CalendarMode, today: NaiveDate) -> CalendarView {
        let dates = RecordedDates::from_strings(self.fetch_recorded_dates().await);
        build_calendar(mode, today, &dates)
    }

    async fn query(&self, request: &QueryDatabaseRequest) -> Option<QueryDatabaseResponse> {
        let response = match self.http.post(self.query_url()).json(request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Recorded dates request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %text, "Failed to fetch recorded dates");
            return None;
        }

        match response.json::<QueryDatabaseResponse>().await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse recorded dates");
                None
            }
        }
    }
}

/// Unique date strings from a query page, in first-seen order.
pub fn unique_dates(page: &QueryDatabaseResponse) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    page.results
        .iter()
        .filter_map(|p| p.date_start())
        .filter(|d| !d.is_empty())
        .filter(|d| seen.insert(d.to_string()))
        .map(str::to_string)
        .collect()
}

/// Human-readable message for a failed write.
///
/// 404 and 401 get fixed hints; otherwise prefer the body's `error` or
/// `message`, then the whole JSON, then the raw text.
pub fn failure_message(status: u16, body: &str) -> String {
    match status {
        404 => return NOT_FOUND_HINT.to_string(),
        401 => return UNAUTHORIZED_HINT.to_string(),
        _ => {}
    }

    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["error", "message"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .map(str::to_string)
            .unwrap_or_else(|| json.to_string()),
        Err(_) if !body.is_empty() => body.to_string(),
        Err(_) => format!("HTTP {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_message_prefers_error_then_message() {
        assert_eq!(
            failure_message(500, r#"{"error":"Server configuration error: Missing API Key"}"#),
            "Server configuration error: Missing API Key"
        );
        assert_eq!(
            failure_message(400, r#"{"object":"error","message":"Category is not a property"}"#),
            "Category is not a property"
        );
        assert_eq!(failure_message(400, r#"{"code":1}"#), r#"{"code":1}"#);
        assert_eq!(failure_message(502, "Bad Gateway"), "Bad Gateway");
        assert_eq!(failure_message(503, ""), "HTTP 503");
    }

    #[test]
    fn test_failure_message_hints() {
        assert_eq!(failure_message(404, r#"{"message":"nope"}"#), NOT_FOUND_HINT);
        assert_eq!(failure_message(401, ""), UNAUTHORIZED_HINT);
    }

    #[test]
    fn test_unique_dates_collapses_duplicates() {
        let page: QueryDatabaseResponse = serde_json::from_value(json!({
            "results": [
                { "properties": { "Date": { "date": { "start": "2026-10-17" } } } },
                { "properties": { "Date": { "date": { "start": "2026-10-17" } } } },
                { "properties": { "Date": { "date": { "start": "2026-10-16" } } } },
                { "properties": {} }
            ]
        }))
        .unwrap();

        assert_eq!(unique_dates(&page), vec!["2026-10-17", "2026-10-16"]);
    }

    #[test]
    fn test_action_result_serializes_for_ui() {
        assert_eq!(
            serde_json::to_value(ActionResult::Success).unwrap(),
            json!({ "status": "success" })
        );
        assert_eq!(
            serde_json::to_value(ActionResult::Failure("boom".into())).unwrap(),
            json!({ "status": "failure", "error": "boom" })
        );
    }
}
