//! Notification type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification delivered to a user
///
/// Arrives either from the REST list endpoint or as the payload of a
/// `notification` frame on the real-time channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
