//! Article sources: the news backend over HTTP or a JSON snapshot on disk.
//!
//! The backend exposes two endpoints:
//!
//! - `GET {base}/articles` returning `{"articles": [...]}`
//! - `GET {base}/categories` returning `{"categories": [...]}`
//!
//! A snapshot file holds both lists in one document:
//! `{"articles": [...], "categories": [...]}`.
//!
//! # Example
//!
//! ```ignore
//! use newsdesk::source::{ApiClient, ClientSettings, NewsSource};
//!
//! let client = ApiClient::new("http://localhost:8000", ClientSettings::default())?;
//! let bundle = NewsSource::Remote(client).load().await?;
//! ```

mod client;
mod snapshot;

pub use client::{ApiClient, ClientSettings};
pub use snapshot::load_snapshot;

use crate::news::NewsBundle;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading articles.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out")]
    Timeout,
    /// Server kept answering 429 after every retry
    #[error("Rate limited after {0} retries")]
    RateLimited(u32),
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body was not the expected JSON shape
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot file too large: {0} bytes")]
    SnapshotTooLarge(u64),
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// Where the article list comes from.
#[derive(Debug, Clone)]
pub enum NewsSource {
    Remote(ApiClient),
    Snapshot(PathBuf),
}

impl NewsSource {
    /// Load articles and categories in one go.
    pub async fn load(&self) -> Result<NewsBundle, SourceError> {
        match self {
            NewsSource::Remote(client) => client.fetch_all().await,
            NewsSource::Snapshot(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || load_snapshot(&path))
                    .await
                    .map_err(|e| SourceError::Io(std::io::Error::other(e)))?
            }
        }
    }

    /// Short description for the status bar and logs.
    pub fn describe(&self) -> String {
        match self {
            NewsSource::Remote(client) => client.base_url().to_string(),
            NewsSource::Snapshot(path) => path.display().to_string(),
        }
    }
}
