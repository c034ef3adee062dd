//! Pagination request/response types.

use crate::repo::{RepoError, RepoResult};
use serde::{Deserialize, Serialize};

/// Largest page size accepted by paginated scans.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Zero-based page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Checks `1 <= size <= MAX_PAGE_SIZE`.
    pub fn validate(&self) -> RepoResult<()> {
        if self.size == 0 || self.size > MAX_PAGE_SIZE {
            return Err(RepoError::InvalidArgument(format!(
                "page size must be within 1..={MAX_PAGE_SIZE}, got {}",
                self.size
            )));
        }
        Ok(())
    }

    /// Number of rows skipped before this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }
}

/// One page of a primary-key ordered scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Row count of the whole scan, not of this page.
    pub total_count: u64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_count,
            page: request.page,
            size: request.size,
        }
    }

    /// `ceil(total_count / size)`; zero for an empty scan.
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.size))
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.page) + 1 >= self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            size: self.size,
        }
    }
}
