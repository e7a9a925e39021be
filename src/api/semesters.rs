//! Semesters API
//!
//! CRUD over `/api/semesters`.

use crate::api::{ListParams, ResourceCrud};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Paginated, Semester};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

const BASE: &str = "/api/semesters";

#[derive(Debug, Clone, Serialize)]
pub struct CreateSemester {
    pub name: String,
    pub number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSemester {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_current: Option<bool>,
}

/// Semesters service
#[derive(Debug, Clone)]
pub struct SemestersApi {
    client: Arc<ApiClient>,
}

impl SemestersApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

impl ResourceCrud for SemestersApi {
    type Item = Semester;
    type Create = CreateSemester;
    type Update = UpdateSemester;

    fn item_id(item: &Semester) -> i64 {
        item.id
    }

    async fn list(&self, params: &ListParams) -> ApiResult<Paginated<Semester>> {
        self.client.get_paginated(BASE, &params.to_query()).await
    }

    async fn get(&self, id: i64) -> ApiResult<Semester> {
        self.client.get(&format!("{}/{}", BASE, id)).await
    }

    async fn create(&self, payload: &CreateSemester) -> ApiResult<Semester> {
        self.client.post(BASE, payload).await
    }

    async fn update(&self, id: i64, payload: &UpdateSemester) -> ApiResult<Semester> {
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
