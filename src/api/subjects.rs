//! Subjects API
//!
//! CRUD over `/api/subjects`.

use crate::api::{ListParams, ResourceCrud};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Paginated, Subject};
use serde::Serialize;
use std::sync::Arc;

const BASE: &str = "/api/subjects";

#[derive(Debug, Clone, Serialize)]
pub struct CreateSubject {
    pub name: String,
    pub code: String,
    pub department_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSubject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
}

/// Subjects service
#[derive(Debug, Clone)]
pub struct SubjectsApi {
    client: Arc<ApiClient>,
}

impl SubjectsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl ResourceCrud for SubjectsApi {
    type Item = Subject;
    type Create = CreateSubject;
    type Update = UpdateSubject;

    fn item_id(item: &Subject) -> i64 {
        item.id
    }

    async fn list(&self, params: &ListParams) -> ApiResult<Paginated<Subject>> {
        self.client.get_paginated(BASE, &params.to_query()).await
    }

    async fn get(&self, id: i64) -> ApiResult<Subject> {
        self.client.get(&format!("{}/{}", BASE, id)).await
    }

    async fn create(&self, payload: &CreateSubject) -> ApiResult<Subject> {
        self.client.post(BASE, payload).await
    }

    async fn update(&self, id: i64, payload: &UpdateSubject) -> ApiResult<Subject> {
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
