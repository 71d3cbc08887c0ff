// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Liveness and configuration status.

use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/health", get(health_check))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub env: EnvStatus,
}

/// Which settings are present. Values are never echoed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EnvStatus {
    pub has_notion_key: bool,
    pub has_db_id: bool,
    pub has_cloudinary: bool,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let config = &state.config;
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: format_utc_rfc3339(chrono::Utc::now()),
        env: EnvStatus {
            has_notion_key: config.notion_api_key.is_some(),
            has_db_id: config.notion_database_id.is_some(),
            has_cloudinary: config.has_cloudinary(),
        },
    })
}
