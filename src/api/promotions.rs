//! Promotions API
//!
//! Promoting a class's students to the next semester is a single backend
//! operation; the client only triggers it and reads the history.

use crate::api::ListParams;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::Paginated;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const BASE: &str = "/api/promotions";

/// Request to promote a class
#[derive(Debug, Clone, Serialize)]
pub struct PromoteClass {
    pub class_id: i64,
    pub to_semester_id: i64,
    /// Students to leave behind (repeating the semester)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excluded_student_ids: Vec<i64>,
}

/// Outcome of a promotion run
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionResult {
    pub promoted: u32,
    pub excluded: u32,
}

/// One entry in the promotion history
#[derive(Debug, Clone, Deserialize)]
pub struct PromotionRecord {
    pub id: i64,
    pub class_id: i64,
    pub from_semester_id: i64,
    pub to_semester_id: i64,
    pub promoted: u32,
    #[serde(default)]
    pub performed_by: Option<i64>,
    #[serde(default)]
    pub performed_at: Option<DateTime<Utc>>,
}

/// Promotions service
#[derive(Debug, Clone)]
pub struct PromotionsApi {
    client: Arc<ApiClient>,
}

impl PromotionsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `POST /api/promotions`, one round trip for the whole class
    pub async fn promote(&self, payload: &PromoteClass) -> ApiResult<PromotionResult> {
        self.client.post(BASE, payload).await
    }

    /// `GET /api/promotions`, past promotion runs
    pub async fn history(&self, params: &ListParams) -> ApiResult<Paginated<PromotionRecord>> {
        self.client.get_paginated(BASE, &params.to_query()).await
    }
}
