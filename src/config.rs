//! Client configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any request
//! is made. A `.env` file in the working directory is honoured.
//!
//! ## Required Variables
//!
//! - `EXAM_API_URL` - Base URL of the exam API (e.g. `http://localhost:5000`)
//!
//! ## Optional Variables
//!
//! - `EXAM_API_TOKEN` - Bearer token; without it every API operation is skipped
//! - `SEARCH_DEBOUNCE_MS` - Quiet period before a search is sent (default: 250)
//! - `SEARCH_MIN_QUERY_LEN` - Shorter queries are sent unfiltered (default: 2)
//! - `VIEW_QUEUE_CAPACITY` - View event buffer size (default: 1024)
//! - `HTTP_TIMEOUT_SECONDS` - Per-request timeout (default: 10)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::application::services::SearchConfig;
use crate::domain::auth::AuthContext;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub log_level: String,
    pub log_format: String,
    pub search_debounce_ms: u64,
    pub search_min_query_len: usize,
    pub view_queue_capacity: usize,
    pub http_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `EXAM_API_URL` is missing.
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("EXAM_API_URL").context("EXAM_API_URL must be set")?;

        let api_token = env::var("EXAM_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let search_debounce_ms = env::var("SEARCH_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(250);

        let search_min_query_len = env::var("SEARCH_MIN_QUERY_LEN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let view_queue_capacity = env::var("VIEW_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let http_timeout_seconds = env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            api_url,
            api_token,
            log_level,
            log_format,
            search_debounce_ms,
            search_min_query_len,
            view_queue_capacity,
            http_timeout_seconds,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `api_url` is not an absolute `http`/`https` URL
    /// - `log_format` is not `text` or `json`
    /// - `search_debounce_ms` is outside 1..=10000
    /// - `view_queue_capacity` is outside 1..=100000
    /// - `http_timeout_seconds` is 0
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)
            .with_context(|| format!("EXAM_API_URL is not a valid URL: '{}'", self.api_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "EXAM_API_URL must start with 'http://' or 'https://', got '{}'",
                self.api_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.search_debounce_ms == 0 || self.search_debounce_ms > 10_000 {
            anyhow::bail!(
                "SEARCH_DEBOUNCE_MS must be between 1 and 10000, got {}",
                self.search_debounce_ms
            );
        }

        if self.view_queue_capacity == 0 || self.view_queue_capacity > 100_000 {
            anyhow::bail!(
                "VIEW_QUEUE_CAPACITY must be between 1 and 100000, got {}",
                self.view_queue_capacity
            );
        }

        if self.http_timeout_seconds == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Search controller settings.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            debounce: Duration::from_millis(self.search_debounce_ms),
            min_query_len: self.search_min_query_len,
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Credential context for API calls; anonymous without a token.
    pub fn auth_context(&self) -> AuthContext {
        match &self.api_token {
            Some(token) => AuthContext::with_token(token.clone()),
            None => AuthContext::anonymous(),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API: {}", self.api_url);
        match &self.api_token {
            Some(token) => tracing::info!("  Token: {}", mask_token(token)),
            None => tracing::info!("  Token: none (API calls disabled)"),
        }
        tracing::info!("  Search debounce: {}ms", self.search_debounce_ms);
        tracing::info!("  Search min query length: {}", self.search_min_query_len);
        tracing::info!("  View queue capacity: {}", self.view_queue_capacity);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks a token for logging, keeping only the last four characters.
///
/// - `eyJhbGciOiJIUzI1NiJ9.abcd` → `***abcd`
/// - tokens of eight characters or fewer → `***`
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
