//! Semester type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An academic semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub id: i64,
    pub name: String,
    /// Ordinal within the programme (1-based)
    pub number: u32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether this is the currently running semester
    #[serde(default)]
    pub is_current: bool,
}
