//! Resource service modules
//!
//! One thin module per backend resource. Each service is a struct over the
//! shared [`ApiClient`](crate::http::ApiClient); services never build
//! requests themselves beyond choosing path, query, and payload. CRUD-shaped
//! services implement [`ResourceCrud`] so the generic entity store can drive
//! any of them.

pub mod classes;
pub mod departments;
pub mod files;
pub mod notifications;
pub mod promotions;
pub mod reports;
pub mod semesters;
pub mod subjects;
pub mod users;

use crate::error::ApiResult;
use crate::models::{Paginated, Pagination};
use serde::Serialize;

pub use classes::ClassesApi;
pub use departments::DepartmentsApi;
pub use files::FilesApi;
pub use notifications::NotificationsApi;
pub use promotions::PromotionsApi;
pub use reports::ReportsApi;
pub use semesters::SemestersApi;
pub use subjects::SubjectsApi;
pub use users::UsersApi;

/// Query parameters for a list endpoint
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    /// Field/value filter pairs, passed through as query parameters
    pub filters: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Flatten into query pairs, defaulting page/limit when unset
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.unwrap_or(1).to_string()),
            (
                "limit".to_string(),
                self.limit.unwrap_or(Pagination::DEFAULT_LIMIT).to_string(),
            ),
        ];
        query.extend(self.filters.iter().cloned());
        query
    }
}

/// The uniform CRUD surface a resource service exposes to the entity store
///
/// Implementations are thin: each method is one HTTP call on the shared
/// client against the service's base path.
pub trait ResourceCrud {
    /// The entity type
    type Item: Clone + Send + Sync;
    /// Payload for `create`
    type Create: Serialize + Send + Sync;
    /// Payload for `update`
    type Update: Serialize + Send + Sync;

    /// The id of an entity, used for in-place list mutation
    fn item_id(item: &Self::Item) -> i64;

    /// List a page of entities
    fn list(
        &self,
        params: &ListParams,
    ) -> impl std::future::Future<Output = ApiResult<Paginated<Self::Item>>> + Send;

    /// Fetch a single entity
    fn get(&self, id: i64) -> impl std::future::Future<Output = ApiResult<Self::Item>> + Send;

    /// Create an entity, returning the stored form
    fn create(
        &self,
        payload: &Self::Create,
    ) -> impl std::future::Future<Output = ApiResult<Self::Item>> + Send;

    /// Update an entity, returning the stored form
    fn update(
        &self,
        id: i64,
        payload: &Self::Update,
    ) -> impl std::future::Future<Output = ApiResult<Self::Item>> + Send;

    /// Delete an entity
    fn remove(&self, id: i64) -> impl std::future::Future<Output = ApiResult<()>> + Send;

    /// Delete several entities in one round trip
    fn remove_many(
        &self,
        ids: &[i64],
    ) -> impl std::future::Future<Output = ApiResult<()>> + Send;
}
