// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use manifest_diary::config::Config;
use manifest_diary::routes::create_router;
use manifest_diary::AppState;
use std::sync::Arc;

/// Test configuration pointing the proxy at a mock Notion server.
#[allow(dead_code)]
pub fn notion_config(notion_url: &str, api_key: Option<&str>, database_id: Option<&str>) -> Config {
    Config {
        notion_api_url: notion_url.to_string(),
        notion_api_key: api_key.map(str::to_string),
        notion_database_id: database_id.map(str::to_string),
        ..Config::default()
    }
}

/// Create a test app from a configuration.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Serve the app on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_app(config: Config) -> String {
    let (app, _state) = create_test_app(config);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
