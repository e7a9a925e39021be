//! Notification store
//!
//! Notifications are created server-side, so this store has no create or
//! update action; the mutations are acknowledgements (read flags) and
//! deletion, applied in place like every other store.

use crate::api::{ListParams, NotificationsApi};
use crate::error::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::models::{Notification, Pagination};
use std::sync::Arc;

/// Client-side cache + acknowledgement actions for notifications
#[derive(Debug)]
pub struct NotificationStore {
    service: NotificationsApi,
    /// Current page of notifications, server order
    pub items: Vec<Notification>,
    pub pagination: Pagination,
    pub is_loading: bool,
    /// Human-readable message from the last failed action
    pub error: Option<String>,
}

impl NotificationStore {
    pub fn new(service: NotificationsApi) -> Self {
        Self {
            service,
            items: Vec::new(),
            pagination: Pagination::default(),
            is_loading: false,
            error: None,
        }
    }

    pub fn for_client(client: Arc<ApiClient>) -> Self {
        Self::new(NotificationsApi::new(client))
    }

    /// Unread count for the current page, what a badge renders
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    /// Fetch the current page
    ///
    /// Same contract as the generic store: wholesale replace on success,
    /// prior `items` untouched on failure.
    pub async fn fetch_list(&mut self) -> ApiResult<()> {
        let params = ListParams::new()
            .page(self.pagination.page)
            .limit(self.pagination.limit);
        self.begin();
        match self.service.list(&params).await {
            Ok(page) => {
                self.items = page.data;
                self.pagination = page.pagination;
                self.finish(None);
                Ok(())
            }
            Err(e) => {
                self.finish(Some(&e));
                Err(e)
            }
        }
    }

    /// Mark one notification as read, updating it in place
    pub async fn mark_read(&mut self, id: i64) -> ApiResult<()> {
        self.begin();
        match self.service.mark_read(id).await {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|n| n.id == id) {
                    *slot = updated;
                }
                self.finish(None);
                Ok(())
            }
            Err(e) => {
                self.finish(Some(&e));
                Err(e)
            }
        }
    }

    /// Mark every notification as read in one round trip
    pub async fn mark_all_read(&mut self) -> ApiResult<()> {
        self.begin();
        match self.service.mark_all_read().await {
            Ok(()) => {
                for notification in &mut self.items {
                    notification.read = true;
                }
                self.finish(None);
                Ok(())
            }
            Err(e) => {
                self.finish(Some(&e));
                Err(e)
            }
        }
    }

    /// Delete a notification; it is filtered out of `items` and the total
    /// decremented
    pub async fn remove(&mut self, id: i64) -> ApiResult<()> {
        self.begin();
        match self.service.remove(id).await {
            Ok(()) => {
                let before = self.items.len();
                self.items.retain(|n| n.id != id);
                let removed = (before - self.items.len()) as u64;
                self.pagination.total = self.pagination.total.saturating_sub(removed);
                self.pagination.recompute();
                self.finish(None);
                Ok(())
            }
            Err(e) => {
                self.finish(Some(&e));
                Err(e)
            }
        }
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn finish(&mut self, error: Option<&ApiError>) {
        self.is_loading = false;
        if let Some(e) = error {
            tracing::warn!("Notification store action failed: {}", e);
            self.error = Some(e.message().to_string());
        }
    }
}
