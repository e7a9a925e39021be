//! Entity store normalization pattern
//!
//! One state container per resource, all behaving identically: a page of
//! `items`, a `selected` entity, pagination and filter bookkeeping, and a
//! loading/error pair the UI renders from. Mutations after create/update/
//! delete are applied in place so the list stays responsive without a
//! refetch.
//!
//! Stores are plain values constructed at application start and passed to
//! whatever owns the screen; there is no ambient global registry. Actions
//! take `&mut self`, so two actions on one store cannot overlap; a slow
//! response can never clobber a fresher one.

use crate::api::{ListParams, ResourceCrud};
use crate::error::{ApiError, ApiResult};
use crate::models::Pagination;

mod aliases;
mod notifications;

pub use aliases::*;
pub use notifications::NotificationStore;

/// Generic client-side cache + CRUD action set for one resource
#[derive(Debug)]
pub struct EntityStore<S: ResourceCrud> {
    service: S,
    /// Current page of entities, unique by id, server order
    pub items: Vec<S::Item>,
    /// Entity loaded by [`fetch_one`](Self::fetch_one)
    pub selected: Option<S::Item>,
    pub pagination: Pagination,
    /// Active field/value filters, sent with every list fetch
    pub filters: Vec<(String, String)>,
    pub is_loading: bool,
    /// Human-readable message from the last failed action
    pub error: Option<String>,
}

impl<S: ResourceCrud> EntityStore<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            items: Vec::new(),
            selected: None,
            pagination: Pagination::default(),
            filters: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    /// The service this store drives
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Replace the filter set and reset to the first page
    ///
    /// Changing filters must never keep a now-out-of-range page.
    pub fn set_filters(&mut self, filters: Vec<(String, String)>) {
        self.filters = filters;
        self.pagination.page = 1;
    }

    /// Change the page size and reset to the first page
    pub fn set_limit(&mut self, limit: u32) {
        self.pagination.limit = limit;
        self.pagination.page = 1;
    }

    /// Fetch the list for the current filters and pagination
    ///
    /// On success `items` and `pagination` are replaced wholesale; on
    /// failure the previous `items` stay visible and only `error` changes.
    pub async fn fetch_list(&mut self) -> ApiResult<()> {
        let params = self.list_params();
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

    /// Fetch a specific page, keeping filters and limit
    pub async fn fetch_page(&mut self, page: u32) -> ApiResult<()> {
        self.pagination.page = page;
        self.fetch_list().await
    }

    /// Load a single entity into `selected`
    pub async fn fetch_one(&mut self, id: i64) -> ApiResult<()> {
        self.begin();
        match self.service.get(id).await {
            Ok(item) => {
                self.selected = Some(item);
                self.finish(None);
                Ok(())
            }
            Err(e) => {
                self.finish(Some(&e));
                Err(e)
            }
        }
    }

    /// Create an entity; the stored form is prepended to `items` and the
    /// total bumped, no refetch
    pub async fn create(&mut self, payload: &S::Create) -> ApiResult<()> {
        self.begin();
        match self.service.create(payload).await {
            Ok(item) => {
                self.items.insert(0, item);
                self.pagination.total += 1;
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

    /// Update an entity in place by id; `selected` is kept in sync when it
    /// is the same entity
    pub async fn update(&mut self, id: i64, payload: &S::Update) -> ApiResult<()> {
        self.begin();
        match self.service.update(id, payload).await {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|i| S::item_id(i) == id) {
                    *slot = updated.clone();
                }
                if self.selected.as_ref().map(|s| S::item_id(s)) == Some(id) {
                    self.selected = Some(updated);
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

    /// Delete an entity; it is filtered out of `items` and the total
    /// decremented
    pub async fn remove(&mut self, id: i64) -> ApiResult<()> {
        self.begin();
        match self.service.remove(id).await {
            Ok(()) => {
                self.drop_local(&[id]);
                self.finish(None);
                Ok(())
            }
            Err(e) => {
                self.finish(Some(&e));
                Err(e)
            }
        }
    }

    /// Delete several entities in a single round trip, applying the same
    /// in-place mutation for every affected id
    pub async fn remove_many(&mut self, ids: &[i64]) -> ApiResult<()> {
        self.begin();
        match self.service.remove_many(ids).await {
            Ok(()) => {
                self.drop_local(ids);
                self.finish(None);
                Ok(())
            }
            Err(e) => {
                self.finish(Some(&e));
                Err(e)
            }
        }
    }

    /// Clear cached state, e.g. on logout
    pub fn reset(&mut self) {
        self.items.clear();
        self.selected = None;
        self.pagination = Pagination::default();
        self.filters.clear();
        self.is_loading = false;
        self.error = None;
    }

    fn list_params(&self) -> ListParams {
        let mut params = ListParams::new()
            .page(self.pagination.page)
            .limit(self.pagination.limit);
        for (field, value) in &self.filters {
            params = params.filter(field.clone(), value.clone());
        }
        params
    }

    fn drop_local(&mut self, ids: &[i64]) {
        let before = self.items.len();
        self.items.retain(|i| !ids.contains(&S::item_id(i)));
        let removed = (before - self.items.len()) as u64;
        self.pagination.total = self.pagination.total.saturating_sub(removed);
        self.pagination.recompute();
        if let Some(selected) = &self.selected {
            if ids.contains(&S::item_id(selected)) {
                self.selected = None;
            }
        }
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    // Every action exit path lands here, success or not; a store must never
    // be left stuck loading.
    fn finish(&mut self, error: Option<&ApiError>) {
        self.is_loading = false;
        if let Some(e) = error {
            tracing::warn!("Store action failed: {}", e);
            self.error = Some(e.message().to_string());
        }
    }
}
