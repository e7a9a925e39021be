//! Reports API
//!
//! Read-only dashboard aggregates; the backend owns all computation.

use crate::error::ApiResult;
use crate::http::ApiClient;
use serde::Deserialize;
use std::sync::Arc;

const BASE: &str = "/api/reports";

/// Headline counts for the dashboard landing page
#[derive(Debug, Clone, Deserialize)]
pub struct OverviewReport {
    pub total_users: u64,
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_departments: u64,
    pub total_classes: u64,
}

/// Per-department breakdown
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentReport {
    pub department_id: i64,
    pub department_name: String,
    pub student_count: u64,
    pub teacher_count: u64,
    pub class_count: u64,
}

/// Reports service
#[derive(Debug, Clone)]
pub struct ReportsApi {
    client: Arc<ApiClient>,
}

impl ReportsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /api/reports/overview`
    pub async fn overview(&self) -> ApiResult<OverviewReport> {
        self.client.get(&format!("{}/overview", BASE)).await
    }

    /// `GET /api/reports/departments`
    pub async fn departments(&self) -> ApiResult<Vec<DepartmentReport>> {
        self.client.get(&format!("{}/departments", BASE)).await
    }

    /// `GET /api/reports/departments/{id}`
    pub async fn department(&self, id: i64) -> ApiResult<DepartmentReport> {
        self.client.get(&format!("{}/departments/{}", BASE, id)).await
    }
}
