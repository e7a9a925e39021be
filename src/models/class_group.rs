//! Class (student group) type

use serde::{Deserialize, Serialize};

/// A class of students within a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassGroup {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
    /// Semester the class is currently in
    #[serde(default)]
    pub semester_id: Option<i64>,
    /// Class teacher / form tutor
    #[serde(default)]
    pub teacher_id: Option<i64>,
    /// Number of enrolled students, when the backend includes it
    #[serde(default)]
    pub student_count: Option<u32>,
}
