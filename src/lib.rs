// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Manifestation Diary: a journaling front-end's server and client library.
//!
//! The server relays browser requests to Notion (where diary entries are
//! stored as database pages) and serves the single-page app. The client side
//! composes entries and derives the streak counter and calendar from the
//! days that have entries.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::NotionProxy;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub notion: NotionProxy,
}

impl AppState {
    /// Build state from configuration loaded at startup.
    pub fn new(config: Config) -> Self {
        let notion = NotionProxy::new(&config);
        Self { config, notion }
    }
}
