//! Files API
//!
//! Metadata listing over `/api/files`, multipart upload, and blob download
//! via `/api/files/{id}/download`.

use crate::api::ListParams;
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Paginated, StoredFile};
use std::sync::Arc;

const BASE: &str = "/api/files";

/// Files service
#[derive(Debug, Clone)]
pub struct FilesApi {
    client: Arc<ApiClient>,
}

impl FilesApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List stored file metadata
    pub async fn list(&self, params: &ListParams) -> ApiResult<Paginated<StoredFile>> {
        self.client.get_paginated(BASE, &params.to_query()).await
    }

    /// Fetch a single file's metadata
    pub async fn get(&self, id: i64) -> ApiResult<StoredFile> {
        self.client.get(&format!("{}/{}", BASE, id)).await
    }

    /// Upload one file as multipart form data
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<StoredFile> {
        self.client
            .upload(BASE, "file", filename, content_type, bytes)
            .await
    }

    /// Download the file's bytes
    pub async fn download(&self, id: i64) -> ApiResult<Vec<u8>> {
        self.client.download(&format!("{}/{}/download", BASE, id)).await
    }

    /// Delete a stored file
    pub async fn remove(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("{}/{}", BASE, id)).await
    }
}
