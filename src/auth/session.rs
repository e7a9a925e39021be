//! Session refresh state machine
//!
//! States: `Anonymous -> Authenticating -> Authenticated -> Refreshing ->
//! Authenticated | Expired`.
//!
//! The manager never trusts a persisted "authenticated" flag: validity is
//! recomputed from the tokens' own expiry claims, locally and before any
//! network call. With both tokens expired or absent, [`SessionManager::current_user`]
//! fails without touching the network at all.
//!
//! Refresh is de-duplicated: concurrent callers serialize on an internal
//! guard and re-check access-token validity after acquiring it, so a burst
//! of simultaneous 401s produces a single refresh request.

use crate::auth::tokens::TokenStore;
use crate::error::{ApiError, ApiResult};
use crate::http::client::{unwrap_data, ApiClient};
use crate::models::User;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Message used when no network call can possibly produce a session
pub const NO_VALID_SESSION: &str = "No valid session. Please log in.";

/// Login credentials
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Lifecycle state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session; nothing attempted yet or logged out
    Anonymous,
    /// Login request in flight
    Authenticating,
    /// Valid access token and loaded user
    Authenticated,
    /// Token rotation in flight
    Refreshing,
    /// Session ended against the user's intent (expiry, refresh failure)
    Expired,
}

/// Snapshot of the session a UI can render from
#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    pub user: Option<User>,
    pub error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: SessionState::Anonymous,
            user: None,
            error: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    refresh_token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    refresh_token: String,
}

/// Runs login / current-user / refresh / logout against the auth endpoints
#[derive(Debug)]
pub struct SessionManager {
    client: Arc<ApiClient>,
    session: RwLock<Session>,
    refresh_guard: Mutex<()>,
}

impl SessionManager {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            session: RwLock::new(Session::default()),
            refresh_guard: Mutex::new(()),
        }
    }

    fn tokens(&self) -> &Arc<TokenStore> {
        self.client.tokens()
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Current lifecycle state
    pub async fn state(&self) -> SessionState {
        self.session.read().await.state
    }

    /// True only while a non-expired access token backs an `Authenticated`
    /// state with a loaded user
    pub async fn is_authenticated(&self) -> bool {
        let session = self.session.read().await;
        session.state == SessionState::Authenticated
            && session.user.is_some()
            && self.tokens().has_valid_access()
    }

    /// `POST /api/auth/login`
    ///
    /// On success both tokens are persisted in one write and the user is
    /// cached; on failure the session returns to `Anonymous` carrying the
    /// error message.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        {
            let mut session = self.session.write().await;
            session.state = SessionState::Authenticating;
            session.error = None;
        }

        let value = match self.client.post_raw("/api/auth/login", credentials).await {
            Ok(value) => value,
            Err(e) => {
                self.fail(SessionState::Anonymous, e.message()).await;
                return Err(e);
            }
        };
        let auth: AuthResponse = match serde_json::from_value(value) {
            Ok(auth) => auth,
            Err(e) => {
                let error = ApiError::decode(e.to_string(), self.client.config().endpoint("/api/auth/login"), "POST");
                self.fail(SessionState::Anonymous, error.message()).await;
                return Err(error);
            }
        };

        self.tokens().set_pair(auth.access_token, auth.refresh_token);
        {
            let mut session = self.session.write().await;
            session.state = SessionState::Authenticated;
            session.user = Some(auth.user.clone());
            session.error = None;
        }
        tracing::info!(username = %auth.user.username, "Logged in");
        Ok(auth.user)
    }

    /// `GET /api/auth/me`, revalidating tokens locally first
    ///
    /// - access token valid: fetch; a 401 triggers one refresh-and-retry
    /// - access expired, refresh valid: refresh first, then fetch once
    /// - both invalid/absent: no network call, straight to `Expired`
    ///
    /// A failure after the one permitted refresh is terminal: tokens are
    /// cleared and the session expires.
    pub async fn current_user(&self) -> ApiResult<User> {
        if !self.tokens().has_valid_access() {
            if !self.tokens().has_valid_refresh() {
                self.tokens().clear();
                self.fail(SessionState::Expired, NO_VALID_SESSION).await;
                return Err(ApiError::session(NO_VALID_SESSION));
            }
            self.refresh().await?;
            return self.fetch_me_terminal().await;
        }

        match self.fetch_me().await {
            Ok(user) => {
                self.accept(user.clone()).await;
                Ok(user)
            }
            Err(e) if e.is_auth() && self.tokens().has_valid_refresh() => {
                // The backend rejected a token that still looks valid locally
                // (revoked); drop it so the refresh cannot skip.
                self.tokens().clear_access_token();
                self.refresh().await?;
                self.fetch_me_terminal().await
            }
            Err(e) => {
                if e.is_auth() {
                    self.tokens().clear();
                    self.fail(SessionState::Expired, e.message()).await;
                } else {
                    self.session.write().await.error = Some(e.message().to_string());
                }
                Err(e)
            }
        }
    }

    /// `POST /api/auth/refresh-token`
    ///
    /// Requires a locally valid refresh token; an already-expired one is
    /// never sent. On success the new pair is persisted; on failure the
    /// session is over.
    pub async fn refresh(&self) -> ApiResult<()> {
        let _guard = self.refresh_guard.lock().await;

        // Someone else refreshed while we waited for the guard
        if self.tokens().has_valid_access() {
            return Ok(());
        }
        if !self.tokens().has_valid_refresh() {
            self.tokens().clear();
            self.fail(SessionState::Expired, NO_VALID_SESSION).await;
            return Err(ApiError::session(NO_VALID_SESSION));
        }
        let refresh_token = self
            .tokens()
            .refresh_token()
            .ok_or_else(|| ApiError::session(NO_VALID_SESSION))?;

        self.session.write().await.state = SessionState::Refreshing;
        tracing::info!("Refreshing session tokens");

        let body = serde_json::json!({ "refresh_token": refresh_token });
        let value = match self.client.post_raw("/api/auth/refresh-token", &body).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                self.tokens().clear();
                self.fail(SessionState::Expired, e.message()).await;
                return Err(e);
            }
        };
        let rotated: RefreshResponse = match serde_json::from_value(value) {
            Ok(rotated) => rotated,
            Err(e) => {
                let error = ApiError::decode(
                    e.to_string(),
                    self.client.config().endpoint("/api/auth/refresh-token"),
                    "POST",
                );
                self.tokens().clear();
                self.fail(SessionState::Expired, error.message()).await;
                return Err(error);
            }
        };

        self.tokens().set_pair(rotated.access_token, rotated.refresh_token);
        let mut session = self.session.write().await;
        session.state = SessionState::Authenticated;
        session.error = None;
        Ok(())
    }

    /// `POST /api/auth/logout`, best effort
    ///
    /// The server call may fail (offline, already expired); local state is
    /// cleared regardless.
    pub async fn logout(&self) {
        if let Err(e) = self
            .client
            .post_raw("/api/auth/logout", &serde_json::json!({}))
            .await
        {
            tracing::warn!("Logout notification failed (ignored): {}", e);
        }
        self.tokens().clear();
        *self.session.write().await = Session::default();
        tracing::info!("Logged out");
    }

    async fn fetch_me(&self) -> ApiResult<User> {
        let value = self.client.get_raw("/api/auth/me").await?;
        serde_json::from_value(unwrap_data(value)).map_err(|e| {
            ApiError::decode(e.to_string(), self.client.config().endpoint("/api/auth/me"), "GET")
        })
    }

    /// The retried fetch after a refresh; failure here ends the session
    async fn fetch_me_terminal(&self) -> ApiResult<User> {
        match self.fetch_me().await {
            Ok(user) => {
                self.accept(user.clone()).await;
                Ok(user)
            }
            Err(e) => {
                self.tokens().clear();
                self.fail(SessionState::Expired, e.message()).await;
                Err(e)
            }
        }
    }

    async fn accept(&self, user: User) {
        let mut session = self.session.write().await;
        session.state = SessionState::Authenticated;
        session.user = Some(user);
        session.error = None;
    }

    async fn fail(&self, state: SessionState, message: &str) {
        let mut session = self.session.write().await;
        session.state = state;
        session.user = None;
        session.error = Some(message.to_string());
    }
}
