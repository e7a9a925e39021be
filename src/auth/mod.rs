//! Authentication
//!
//! Two pieces: the [`tokens`] module owns the bearer token pair (persistence
//! and local expiry validation), and the [`session`] module runs the
//! login / refresh / logout state machine on top of it.

pub mod session;
pub mod tokens;

pub use session::{Credentials, Session, SessionManager, SessionState, NO_VALID_SESSION};
pub use tokens::{is_token_valid, TokenPair, TokenStore};
