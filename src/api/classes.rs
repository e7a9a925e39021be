//! Classes API
//!
//! CRUD over `/api/classes`.

use crate::api::{ListParams, ResourceCrud};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{ClassGroup, Paginated};
use serde::Serialize;
use std::sync::Arc;

const BASE: &str = "/api/classes";

#[derive(Debug, Clone, Serialize)]
pub struct CreateClass {
    pub name: String,
    pub department_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateClass {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
}

/// Classes service
#[derive(Debug, Clone)]
pub struct ClassesApi {
    client: Arc<ApiClient>,
}

impl ClassesApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl ResourceCrud for ClassesApi {
    type Item = ClassGroup;
    type Create = CreateClass;
    type Update = UpdateClass;

    fn item_id(item: &ClassGroup) -> i64 {
        item.id
    }

    async fn list(&self, params: &ListParams) -> ApiResult<Paginated<ClassGroup>> {
        self.client.get_paginated(BASE, &params.to_query()).await
    }

    async fn get(&self, id: i64) -> ApiResult<ClassGroup> {
        self.client.get(&format!("{}/{}", BASE, id)).await
    }

    async fn create(&self, payload: &CreateClass) -> ApiResult<ClassGroup> {
        self.client.post(BASE, payload).await
    }

    async fn update(&self, id: i64, payload: &UpdateClass) -> ApiResult<ClassGroup> {
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
