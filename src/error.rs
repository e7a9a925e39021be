//! Normalized Error Types
//!
//! Every failure that leaves the HTTP client or the socket service is one of
//! these variants; callers never see a raw `reqwest` or `tungstenite` error.
//!
//! # Error Categories
//!
//! - `Transport` - network unreachable, timeout, connection reset
//! - `Auth` - 401, the session is no longer valid
//! - `Validation` - other 4xx, optionally with the backend's field-level detail
//! - `Server` - 5xx
//! - `Decode` - response body did not match the expected shape
//! - `Session` - local session problems (no valid tokens, refresh exhausted)
//! - `Socket` - WebSocket connection or dispatch failures
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ApiResult<T> = Result<T, ApiError>;

/// Normalized error for every API and socket failure.
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// Network-level failure before an HTTP status was received
    #[error("Network error ({method} {url}): {message}")]
    Transport {
        /// Human-readable error message
        message: String,
        /// Request URL
        url: String,
        /// HTTP method
        method: String,
    },

    /// 401 Unauthorized
    #[error("Authentication failed ({method} {url}): {message}")]
    Auth {
        /// Human-readable error message
        message: String,
        /// Request URL
        url: String,
        /// HTTP method
        method: String,
    },

    /// 4xx other than 401
    #[error("Request rejected with {status} ({method} {url}): {message}")]
    Validation {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw error body from the backend, when it sent one
        details: Option<serde_json::Value>,
        /// Request URL
        url: String,
        /// HTTP method
        method: String,
    },

    /// 5xx
    #[error("Server error {status} ({method} {url}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Request URL
        url: String,
        /// HTTP method
        method: String,
    },

    /// Response body could not be parsed into the expected type
    #[error("Failed to decode response ({method} {url}): {message}")]
    Decode {
        /// Human-readable error message
        message: String,
        /// Request URL
        url: String,
        /// HTTP method
        method: String,
    },

    /// Local session failure (no network involved)
    #[error("Session error: {message}")]
    Session {
        /// Human-readable error message
        message: String,
    },

    /// WebSocket failure
    #[error("Socket error: {message}")]
    Socket {
        /// Human-readable error message
        message: String,
    },
}

impl ApiError {
    /// Classify a non-success HTTP status into the right variant.
    ///
    /// `body` is the raw response body; a JSON body with a `message` or
    /// `detail` field supplies the message, otherwise the body text (or the
    /// status line) is used verbatim.
    pub fn from_status(status: u16, body: &str, url: &str, method: &str) -> Self {
        let details: Option<serde_json::Value> = serde_json::from_str(body).ok();
        let message = details
            .as_ref()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("detail"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.to_string()
                }
            });

        match status {
            401 => Self::Auth {
                message,
                url: url.to_string(),
                method: method.to_string(),
            },
            400..=499 => Self::Validation {
                status,
                message,
                details,
                url: url.to_string(),
                method: method.to_string(),
            },
            _ => Self::Server {
                status,
                message,
                url: url.to_string(),
                method: method.to_string(),
            },
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>, url: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            url: url.into(),
            method: method.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>, url: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            url: url.into(),
            method: method.into(),
        }
    }

    /// Create a local session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a socket error
    pub fn socket(message: impl Into<String>) -> Self {
        Self::Socket {
            message: message.into(),
        }
    }

    /// HTTP status, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { .. } => Some(401),
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The human-readable message carried by every variant.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. }
            | Self::Auth { message, .. }
            | Self::Validation { message, .. }
            | Self::Server { message, .. }
            | Self::Decode { message, .. }
            | Self::Session { message }
            | Self::Socket { message } => message,
        }
    }

    /// True when this error means the session is no longer valid.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}
