//! Departments API
//!
//! CRUD over `/api/departments`.

use crate::api::{ListParams, ResourceCrud};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Department, Paginated};
use serde::Serialize;
use std::sync::Arc;

const BASE: &str = "/api/departments";

#[derive(Debug, Clone, Serialize)]
pub struct CreateDepartment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hod_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDepartment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hod_id: Option<i64>,
}

/// Departments service
#[derive(Debug, Clone)]
pub struct DepartmentsApi {
    client: Arc<ApiClient>,
}

impl DepartmentsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl ResourceCrud for DepartmentsApi {
    type Item = Department;
    type Create = CreateDepartment;
    type Update = UpdateDepartment;

    fn item_id(item: &Department) -> i64 {
        item.id
    }

    async fn list(&self, params: &ListParams) -> ApiResult<Paginated<Department>> {
        self.client.get_paginated(BASE, &params.to_query()).await
    }

    async fn get(&self, id: i64) -> ApiResult<Department> {
        self.client.get(&format!("{}/{}", BASE, id)).await
    }

    async fn create(&self, payload: &CreateDepartment) -> ApiResult<Department> {
        self.client.post(BASE, payload).await
    }

    async fn update(&self, id: i64, payload: &UpdateDepartment) -> ApiResult<Department> {
        self.client.put(&format!("{}/{}", BASE, id), payload).await
    }

    async fn remove(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("{}/{}", BASE, id)).await
    }

    async fn remove_many(&self, ids: &[i64]) -> ApiResult<()> {
        self.client
            .delete_with_body(&format!("{}/bulk", BASE), &serde_json::json!({ "ids": ids }))
            .await
    }
}
