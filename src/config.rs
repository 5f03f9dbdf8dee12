//! Configuration file parser for ~/.config/newsdesk/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde and logged as warnings, since they are
//! usually typos.
use crate::news::{SearchScope, PAGE_SIZE};
use crate::source::ClientSettings;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// A value parsed but is outside its allowed range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the news backend serving `/articles` and `/categories`.
    pub backend_url: String,

    /// Site that relative article links point into.
    pub site_url: String,

    /// Articles per page.
    pub page_size: usize,

    /// "narrow" (searches compound) or "category" (each search starts from
    /// the category-filtered list).
    pub search_scope: SearchScope,

    /// Logical pixels per terminal column, used for the menu breakpoint.
    pub cell_width_px: u32,

    pub request_timeout_secs: u64,

    pub max_retries: u32,

    /// Base retry delay in milliseconds, doubled on each attempt.
    pub retry_backoff_ms: u64,

    /// Reload interval in minutes. 0 = manual refresh only.
    pub refresh_interval_minutes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            site_url: "https://www.haberler.com".to_string(),
            page_size: PAGE_SIZE,
            search_scope: SearchScope::Narrow,
            cell_width_px: 8,
            request_timeout_secs: 30,
            max_retries: 5,
            retry_backoff_ms: 1000,
            refresh_interval_minutes: 0,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Longest accepted request timeout (one hour).
    const MAX_TIMEOUT_SECS: u64 = 3600;

    /// Longest accepted refresh interval (one week).
    const MAX_REFRESH_MINUTES: u64 = 7 * 24 * 60;

    const KNOWN_KEYS: [&'static str; 9] = [
        "backend_url",
        "site_url",
        "page_size",
        "search_scope",
        "cell_width_px",
        "request_timeout_secs",
        "max_retries",
        "retry_backoff_ms",
        "refresh_interval_minutes",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing or empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Out-of-range `page_size`, `cell_width_px`, `request_timeout_secs` or
    ///   `refresh_interval_minutes` → `Err(ConfigError::Invalid)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            backend = %config.backend_url,
            page_size = config.page_size,
            "Loaded configuration"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.cell_width_px == 0 {
            return Err(ConfigError::Invalid("cell_width_px must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > Self::MAX_TIMEOUT_SECS {
            return Err(ConfigError::Invalid(format!(
                "request_timeout_secs must be between 1 and {}",
                Self::MAX_TIMEOUT_SECS
            )));
        }
        if self.refresh_interval_minutes > Self::MAX_REFRESH_MINUTES {
            return Err(ConfigError::Invalid(format!(
                "refresh_interval_minutes must be at most {}",
                Self::MAX_REFRESH_MINUTES
            )));
        }
        Ok(())
    }

    /// HTTP client settings derived from the config.
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            timeout: Duration::from_secs(self.request_timeout_secs),
            max_retries: self.max_retries,
            backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    /// `None` when periodic refresh is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_minutes > 0)
            .then(|| Duration::from_secs(self.refresh_interval_minutes.saturating_mul(60)))
    }
}

// ============================================================================
// Tests
// ============================================================================
