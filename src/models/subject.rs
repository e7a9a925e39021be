//! Subject type

use serde::{Deserialize, Serialize};

/// A subject taught within a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    /// Short code, e.g. "CSC201"
    pub code: String,
    pub department_id: i64,
    #[serde(default)]
    pub semester_id: Option<i64>,
    /// Assigned teacher
    #[serde(default)]
    pub teacher_id: Option<i64>,
}
