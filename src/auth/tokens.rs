//! Token Store
//!
//! Single source of truth for the access/refresh token pair. Tokens survive
//! process restarts through a JSON file in the platform config directory,
//! written atomically so a concurrent reader never observes a partial pair.
//! A persisted pair is never trusted blindly: validity is recomputed from the
//! token's own expiry claim on every read that needs it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Tolerance for clock drift between client and backend, in seconds.
/// A token within this window of its expiry is treated as already expired.
const CLOCK_SKEW_SECS: i64 = 30;

/// File name for the persisted pair
const TOKENS_FILE: &str = "tokens.json";

/// The access/refresh pair, the unit of atomic persistence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Owns the bearer tokens for the process
///
/// All mutation goes through this store; the HTTP client reads the access
/// token on every request and the session manager rotates the pair on
/// login/refresh and clears it on logout.
#[derive(Debug)]
pub struct TokenStore {
    inner: RwLock<TokenPair>,
    path: Option<PathBuf>,
}

impl TokenStore {
    /// Store that lives only for the process lifetime (tests, embedders with
    /// their own persistence)
    pub fn in_memory() -> Self {
        Self {
            inner: RwLock::new(TokenPair::default()),
            path: None,
        }
    }

    /// Store persisted under the platform config directory
    /// (`<config>/campusync/tokens.json`), loading any previously saved pair
    pub fn persistent() -> Self {
        let path = dirs::config_dir().map(|dir| dir.join("campusync").join(TOKENS_FILE));
        match path {
            Some(path) => Self::persistent_at(path),
            None => {
                tracing::warn!("No config directory available, tokens will not persist");
                Self::in_memory()
            }
        }
    }

    /// Store persisted at an explicit path
    pub fn persistent_at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let pair = load_pair(&path).unwrap_or_default();
        Self {
            inner: RwLock::new(pair),
            path: Some(path),
        }
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<String> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).access.clone()
    }

    /// Current refresh token, if any
    pub fn refresh_token(&self) -> Option<String> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).refresh.clone()
    }

    /// Replace the access token
    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.access = Some(token.into());
        self.persist(&inner);
    }

    /// Replace the refresh token
    pub fn set_refresh_token(&self, token: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.refresh = Some(token.into());
        self.persist(&inner);
    }

    /// Replace both tokens in one write, the normal path after login/refresh
    pub fn set_pair(&self, access: impl Into<String>, refresh: impl Into<String>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.access = Some(access.into());
        inner.refresh = Some(refresh.into());
        self.persist(&inner);
    }

    /// Remove only the access token, keeping the refresh token
    ///
    /// Used when the backend rejects an access token that still looks valid
    /// locally (revocation); the refresh path must not skip on it.
    pub fn clear_access_token(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.access = None;
        self.persist(&inner);
    }

    /// Remove both tokens; called on logout and on unrecoverable refresh failure
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *inner = TokenPair::default();
        self.persist(&inner);
    }

    /// Whether a non-expired access token is currently held
    pub fn has_valid_access(&self) -> bool {
        self.access_token().as_deref().map(is_token_valid).unwrap_or(false)
    }

    /// Whether a non-expired refresh token is currently held
    pub fn has_valid_refresh(&self) -> bool {
        self.refresh_token().as_deref().map(is_token_valid).unwrap_or(false)
    }

    // Persistence failures do not invalidate the in-memory pair; the session
    // simply will not survive a restart. Logged, not propagated.
    fn persist(&self, pair: &TokenPair) {
        let Some(path) = &self.path else { return };
        if let Err(e) = save_pair(path, pair) {
            tracing::warn!("Failed to persist tokens to {}: {}", path.display(), e);
        }
    }
}

/// Check a JWT's embedded expiry against the current time.
///
/// Only the `exp` claim is inspected; the signature belongs to the backend
/// and is not verifiable client-side. Fails closed: malformed input, a
/// missing claim, or an expiry inside the clock-skew window all yield
/// `false`.
pub fn is_token_valid(token: &str) -> bool {
    match decode_expiry(token) {
        Some(exp) => exp > Utc::now().timestamp() + CLOCK_SKEW_SECS,
        None => false,
    }
}

fn decode_expiry(token: &str) -> Option<i64> {
    let mut parts = token.split('.');
    let (_header, claims) = (parts.next()?, parts.next()?);
    parts.next()?; // signature segment must exist
    let bytes = URL_SAFE_NO_PAD.decode(claims).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value.get("exp")?.as_i64()
}

fn load_pair(path: &Path) -> Option<TokenPair> {
    let bytes = std::fs::read(path).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(pair) => Some(pair),
        Err(e) => {
            tracing::warn!("Ignoring unreadable token file {}: {}", path.display(), e);
            None
        }
    }
}

fn save_pair(path: &Path, pair: &TokenPair) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Write-then-rename so readers see either the old pair or the new one
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_vec(pair)?)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn make_jwt(exp_offset_secs: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = serde_json::json!({
        "sub": "1",
        "exp": Utc::now().timestamp() + exp_offset_secs,
    });
    let claims = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{}.{}.sig", header, claims)
}
