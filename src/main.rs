// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Manifestation Diary Server
//!
//! Serves the diary single-page app and relays its Notion API calls.

use manifest_diary::{config::Config, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Manifestation Diary server");
    tracing::info!(
        notion_api_key = if config.notion_api_key.is_some() { "configured" } else { "MISSING" },
        database_id = if config.notion_database_id.is_some() { "configured" } else { "MISSING" },
        cloudinary = if config.has_cloudinary() { "configured" } else { "MISSING" },
        static_dir = %config.static_dir.display(),
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(config.clone()));

    // Build router
    let app = manifest_diary::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("manifest_diary=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
