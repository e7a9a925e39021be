//! Campusync - LMS Dashboard Client
//!
//! Campusync is the client-side core for a learning-management-system
//! dashboard: everything between a UI and the backend's REST/WebSocket API.
//!
//! # Overview
//!
//! This library provides:
//! - Bearer token storage with local expiry validation
//! - A single configured HTTP client with centralized auth and error handling
//! - The login / refresh / logout session state machine
//! - Thin per-resource API services (users, departments, classes, subjects,
//!   semesters, notifications, files, reports, promotions)
//! - A generic entity store implementing the uniform CRUD cache contract
//! - A reconnecting real-time channel for notifications and analytics
//!
//! # Module Structure
//!
//! - **`config`** - Backend base URL, timeout, WebSocket URL derivation
//! - **`error`** - The normalized error every failure is converted into
//! - **`models`** - Wire types shared across services and stores
//! - **`auth`** - Token store and session manager
//! - **`http`** - The configured request layer
//! - **`api`** - One service module per backend resource
//! - **`store`** - The per-entity cache + CRUD action pattern
//! - **`realtime`** - Reconnecting `{type, payload}` socket channel
//!
//! # Usage
//!
//! ```rust,no_run
//! use campusync::auth::{Credentials, SessionManager, TokenStore};
//! use campusync::config::ClientConfig;
//! use campusync::http::ApiClient;
//! use campusync::store::UserStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> campusync::error::ApiResult<()> {
//! let config = ClientConfig::new();
//! let tokens = Arc::new(TokenStore::persistent());
//! let client = Arc::new(ApiClient::new(config, tokens)?);
//!
//! let session = SessionManager::new(client.clone());
//! session
//!     .login(&Credentials {
//!         username: "admin".to_string(),
//!         password: "secret".to_string(),
//!     })
//!     .await?;
//!
//! let mut users = UserStore::for_client(client.clone());
//! users.fetch_list().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Data Flow
//!
//! UI -> store action -> service function -> HTTP client (attaches token,
//! normalizes response and error) -> backend. On a 401 the client clears the
//! token store and publishes a session-invalidated event; the session
//! manager's refresh path retries the current-user fetch once before giving
//! up.
//!
//! # Error Handling
//!
//! Every failure surfaces as [`error::ApiError`]; stores additionally record
//! the message in their `error` field and rethrow, so the UI can both render
//! the field and react to the returned error. Socket failures never surface
//! as errors at all; they drive the reconnection state machine.
//!
//! # Thread Safety
//!
//! The token store and the HTTP client are `Send + Sync` and meant to be
//! shared behind `Arc`; stores are single-owner values whose actions take
//! `&mut self`.

/// Client configuration
pub mod config;

/// Normalized error types
pub mod error;

/// Shared wire types
pub mod models;

/// Token storage and session state machine
pub mod auth;

/// The configured HTTP request layer
pub mod http;

/// Per-resource API services
pub mod api;

/// Per-entity cache stores
pub mod store;

/// Reconnecting real-time channel
pub mod realtime;

pub use auth::{Credentials, SessionManager, SessionState, TokenStore};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::{ApiClient, SessionEvent};
