// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - outbound API clients.

pub mod cloudinary;
pub mod diary;
pub mod notion;

pub use cloudinary::{CloudinaryClient, UploadError};
pub use diary::{ActionResult, DiaryClient};
pub use notion::{NotionProxy, ProxyRequest, ProxyResponse};
