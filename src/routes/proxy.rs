// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notion proxy routes.

use crate::error::{AppError, Result};
use crate::services::ProxyRequest;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{OriginalUri, State},
    http::Method,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

/// Prefix the front-end uses.
pub const PROXY_PREFIX: &str = "/api/notion";

/// Prefix kept for older front-end builds.
pub const LEGACY_PROXY_PREFIX: &str = "/notion/api";

/// Proxy routes: every method under either prefix is forwarded.
///
/// `{*path}` never matches an empty remainder, so the bare prefix and the
/// prefix with a trailing slash get their own routes.
pub fn routes() -> Router<Arc<AppState>> {
    [PROXY_PREFIX, LEGACY_PROXY_PREFIX]
        .into_iter()
        .fold(Router::new(), |router, prefix| {
            router
                .route(prefix, any(forward))
                .route(&format!("{prefix}/"), any(forward))
                .route(&format!("{prefix}/{{*path}}"), any(forward))
        })
}

/// Sub-path after the proxy prefix, still percent-encoded, without a leading
/// slash.
pub fn sub_path(uri_path: &str) -> &str {
    [PROXY_PREFIX, LEGACY_PROXY_PREFIX]
        .into_iter()
        .find_map(|prefix| uri_path.strip_prefix(prefix))
        .unwrap_or(uri_path)
        .trim_start_matches('/')
}

/// Forward one request to Notion and relay the outcome.
async fn forward(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<Response> {
    let path = sub_path(uri.path()).to_string();
    let query = uri.query().map(str::to_string);
    tracing::info!(method = %method, path = %path, "Proxy request");

    let body = if body.is_empty() {
        None
    } else {
        Some(
            serde_json::from_slice(&body)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?,
        )
    };

    let response = state
        .notion
        .forward(ProxyRequest {
            method,
            path,
            query,
            body,
        })
        .await?;

    tracing::info!(status = response.status.as_u16(), "Proxy response");
    Ok(match response.body {
        Value::Null => response.status.into_response(),
        body => (response.status, Json(body)).into_response(),
    })
}
