//! Client configuration
//!
//! Resolves the backend base URL (environment variable with a local-development
//! default), the request timeout, and the WebSocket endpoints derived from the
//! base URL.

use std::time::Duration;
use thiserror::Error;

/// Environment variable selecting the backend base URL
pub const API_URL_ENV: &str = "CAMPUSYNC_API_URL";

/// Default backend URL for local development
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_url: String,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self {
            api_url: normalize_base_url(api_url),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration from the environment (or defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// The configured backend base URL (no trailing slash)
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Request timeout applied to every HTTP call
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// WebSocket URL for a path, derived from the base URL
    /// (`http` becomes `ws`, `https` becomes `wss`)
    pub fn ws_endpoint(&self, path: &str) -> String {
        let base = if let Some(rest) = self.api_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.api_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.api_url.clone()
        };
        format!("{}{}", base, path)
    }

    /// Notification channel URL for a user
    pub fn notifications_ws_url(&self, user_id: i64) -> String {
        self.ws_endpoint(&format!("/api/notifications/ws/{}", user_id))
    }

    /// Analytics channel URL
    pub fn analytics_ws_url(&self) -> String {
        self.ws_endpoint("/api/analytics/ws")
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_url: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the backend base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_url = self
            .api_url
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(api_url));
        }
        Ok(ClientConfig {
            api_url: normalize_base_url(api_url),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}
