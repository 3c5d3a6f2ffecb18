//! Configuration file parser for ~/.config/newbie/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::day::offset_from_minutes;
use crate::util::{validate_base_url, UrlValidationError};

/// Environment variable that overrides `api_base_url`.
pub const BASE_URL_ENV: &str = "NEWBIE_API_BASE_URL";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] UrlValidationError),

    #[error("UTC offset out of range: {0} minutes")]
    InvalidOffset(i32),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Client configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the contents API, e.g. `https://newsservice.shop`.
    pub api_base_url: String,

    /// Reference time zone as minutes east of UTC. Days are resolved in this offset.
    pub utc_offset_minutes: i32,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Upper bound on in-flight detail requests. 0 = one per identifier.
    pub max_concurrency: usize,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://newsservice.shop".to_string(),
            utc_offset_minutes: 9 * 60,
            request_timeout_secs: 15,
            max_concurrency: 0,
            user_agent: concat!("newbie-feed/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "api_base_url",
        "utc_offset_minutes",
        "request_timeout_secs",
        "max_concurrency",
        "user_agent",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading to avoid pulling a huge file into memory
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

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content, path)
    }

    /// Parse configuration from TOML text. `origin` is only used for logging.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!(path = %origin.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            path = %origin.display(),
            base_url = %config.api_base_url,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Apply the `NEWBIE_API_BASE_URL` override when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        self
    }

    fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(base) = value.filter(|v| !v.trim().is_empty()) {
            tracing::info!(base_url = %base, "Using API base URL from environment");
            self.api_base_url = base.trim().to_string();
        }
    }

    /// Validated API origin.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Ok(validate_base_url(&self.api_base_url)?)
    }

    /// Reference time zone.
    pub fn reference_offset(&self) -> Result<FixedOffset, ConfigError> {
        offset_from_minutes(self.utc_offset_minutes)
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_minutes))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Concurrency limit, with 0 meaning "unbounded".
    pub fn concurrency_limit(&self) -> Option<usize> {
        (self.max_concurrency > 0).then_some(self.max_concurrency)
    }
}

// ============================================================================
// Tests
// ============================================================================
