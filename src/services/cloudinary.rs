// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloudinary unsigned image uploads for photo moments.

use crate::config::{Config, DEFAULT_CLOUDINARY_API_URL};
use serde::Deserialize;

/// Upload errors
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Cloudinary cloud name and upload preset must be configured")]
    NotConfigured,

    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Rejected(String),
}

/// Upload response; only the fields the diary reads.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    error: Option<UploadErrorBody>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    message: String,
}

/// Client for Cloudinary's unsigned upload endpoint.
#[derive(Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    base_url: String,
    cloud_name: Option<String>,
    upload_preset: Option<String>,
}

impl CloudinaryClient {
    pub fn new(cloud_name: Option<String>, upload_preset: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_CLOUDINARY_API_URL.to_string(),
            cloud_name,
            upload_preset,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.cloudinary_cloud_name.clone(),
            config.cloudinary_upload_preset.clone(),
        )
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.cloud_name.is_some() && self.upload_preset.is_some()
    }

    /// Upload an image and return its `secure_url`.
    ///
    /// Checks configuration before touching the network.
    pub async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, UploadError> {
        let (Some(cloud_name), Some(preset)) = (&self.cloud_name, &self.upload_preset) else {
            return Err(UploadError::NotConfigured);
        };

        let url = format!(
            "{}/{}/image/upload",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(cloud_name)
        );

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", preset.clone());

        tracing::info!(file_name, "Uploading image to Cloudinary");

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed: UploadResponse = serde_json::from_str(&text)
            .map_err(|_| UploadError::Rejected(format!("HTTP {}: {}", status.as_u16(), text)))?;

        if let Some(error) = parsed.error {
            return Err(UploadError::Rejected(error.message));
        }

        parsed
            .secure_url
            .ok_or_else(|| UploadError::Rejected("Upload response missing secure_url".to_string()))
    }
}
