// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. The Notion credential is optional here:
//! a missing key is reported per request by the proxy, so the static site and
//! health check keep working on a half-configured deployment.

use std::env;
use std::path::PathBuf;

/// Default Notion REST API base URL.
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com/v1";

/// Default Cloudinary REST API base URL.
pub const DEFAULT_CLOUDINARY_API_URL: &str = "https://api.cloudinary.com/v1_1";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Notion ---
    /// Integration secret sent as the bearer credential
    pub notion_api_key: Option<String>,
    /// Database used when a client request names none
    pub notion_database_id: Option<String>,
    /// Notion API base URL (overridable for tests)
    pub notion_api_url: String,

    // --- Cloudinary (photo moments) ---
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_upload_preset: Option<String>,

    // --- Server ---
    /// Directory holding the built single-page app
    pub static_dir: PathBuf,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            notion_api_key: Some("secret_test_key".to_string()),
            notion_database_id: Some("test-database-id".to_string()),
            notion_api_url: DEFAULT_NOTION_API_URL.to_string(),
            cloudinary_cloud_name: None,
            cloudinary_upload_preset: None,
            static_dir: PathBuf::from("dist"),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Each setting accepts both its plain name and the `VITE_`-prefixed name
    /// the front-end build uses, so one `.env` file serves both.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match non_empty_var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT", raw))?,
            None => 8080,
        };

        Ok(Self {
            notion_api_key: first_var(&["NOTION_API_KEY", "VITE_NOTION_API_KEY"]),
            notion_database_id: first_var(&["NOTION_DATABASE_ID", "VITE_NOTION_DATABASE_ID"]),
            notion_api_url: non_empty_var("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
            cloudinary_cloud_name: first_var(&[
                "CLOUDINARY_CLOUD_NAME",
                "VITE_CLOUDINARY_CLOUD_NAME",
            ]),
            cloudinary_upload_preset: first_var(&[
                "CLOUDINARY_UPLOAD_PRESET",
                "VITE_CLOUDINARY_UPLOAD_PRESET",
            ]),
            static_dir: non_empty_var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("dist")),
            port,
        })
    }

    /// Whether both Cloudinary settings needed for photo uploads are present.
    pub fn has_cloudinary(&self) -> bool {
        self.cloudinary_cloud_name.is_some() && self.cloudinary_upload_preset.is_some()
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First non-blank value among several aliases.
fn first_var(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| non_empty_var(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
