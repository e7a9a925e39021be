//! Stored file metadata type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a file stored on the backend
///
/// The bytes themselves are fetched separately via
/// `/api/files/{id}/download`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: i64,
    pub filename: String,
    #[serde(default)]
    pub content_type: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: Option<u64>,
    /// User id of the uploader
    #[serde(default)]
    pub uploaded_by: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
