//! User account types

use serde::{Deserialize, Serialize};

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Head of department
    Hod,
    /// Teaching staff
    Teacher,
    /// Enrolled student
    Student,
}

impl Role {
    /// Stable string form, matching the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hod => "hod",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

/// A user account, owned by the backend and cached read-only in the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    /// Department the user belongs to (HODs, teachers, students)
    #[serde(default)]
    pub department_id: Option<i64>,
    /// Class the user belongs to (students only)
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub full_name: Option<String>,
}
