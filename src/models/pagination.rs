//! Pagination envelope
//!
//! Every list endpoint returns its items inside this envelope; the stores
//! mutate `total` in place after create/delete so the UI stays consistent
//! without a refetch.

use serde::{Deserialize, Serialize};

/// Pagination bookkeeping for a listed resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: u32,
    /// Maximum items per page
    pub limit: u32,
    /// Total items across all pages
    pub total: u64,
    /// `ceil(total / limit)`
    pub total_pages: u32,
}

impl Pagination {
    /// Default page size used when the caller does not specify one
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Build a pagination record, computing `total_pages` from the other fields
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64) as u32
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// Recompute `total_pages` after an in-place `total` adjustment
    pub fn recompute(&mut self) {
        *self = Self::new(self.page, self.limit, self.total);
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT, 0)
    }
}

/// A page of results plus its pagination record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}
