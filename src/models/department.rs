//! Department type

use serde::{Deserialize, Serialize};

/// An academic department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    /// Short code, e.g. "CSC"
    #[serde(default)]
    pub code: Option<String>,
    /// User id of the head of department
    #[serde(default)]
    pub hod_id: Option<i64>,
}
