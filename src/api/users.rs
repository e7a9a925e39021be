//! Users API
//!
//! CRUD over `/api/users`, plus the bulk operations the admin screens use:
//! multi-id delete and CSV bulk upload.

use crate::api::{ListParams, ResourceCrud};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Paginated, Role, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const BASE: &str = "/api/users";

/// Payload for creating a user
#[derive(Debug, Clone, Serialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Partial update payload; only present fields are sent
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Outcome of a CSV bulk upload
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUploadReport {
    pub created: u32,
    pub failed: u32,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Users service
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: Arc<ApiClient>,
}

impl UsersApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Upload a CSV of users in one request (`POST /api/users/bulk-upload`)
    pub async fn bulk_upload(&self, filename: &str, bytes: Vec<u8>) -> ApiResult<BulkUploadReport> {
        self.client
            .upload(&format!("{}/bulk-upload", BASE), "file", filename, "text/csv", bytes)
            .await
    }
}

impl ResourceCrud for UsersApi {
    type Item = User;
    type Create = CreateUser;
    type Update = UpdateUser;

    fn item_id(item: &User) -> i64 {
        item.id
    }

    async fn list(&self, params: &ListParams) -> ApiResult<Paginated<User>> {
        self.client.get_paginated(BASE, &params.to_query()).await
    }

    async fn get(&self, id: i64) -> ApiResult<User> {
        self.client.get(&format!("{}/{}", BASE, id)).await
    }

    async fn create(&self, payload: &CreateUser) -> ApiResult<User> {
        self.client.post(BASE, payload).await
    }

    async fn update(&self, id: i64, payload: &UpdateUser) -> ApiResult<User> {
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
