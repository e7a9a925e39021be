//! Notifications API
//!
//! Read-and-acknowledge surface over `/api/notifications`; notifications are
//! created server-side and arrive in real time over the socket channel.

use crate::api::ListParams;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Notification, Paginated};
use std::sync::Arc;

const BASE: &str = "/api/notifications";

/// Notifications service
#[derive(Debug, Clone)]
pub struct NotificationsApi {
    client: Arc<ApiClient>,
}

impl NotificationsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List notifications for the current user
    pub async fn list(&self, params: &ListParams) -> ApiResult<Paginated<Notification>> {
        self.client.get_paginated(BASE, &params.to_query()).await
    }

    /// Mark one notification as read
    pub async fn mark_read(&self, id: i64) -> ApiResult<Notification> {
        self.client
            .put(&format!("{}/{}/read", BASE, id), &serde_json::json!({}))
            .await
    }

    /// Mark every notification for the current user as read
    pub async fn mark_all_read(&self) -> ApiResult<()> {
        let _: serde_json::Value = self
            .client
            .put(&format!("{}/read-all", BASE), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// Delete a notification
    pub async fn remove(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("{}/{}", BASE, id)).await
    }
}
