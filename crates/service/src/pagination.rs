//! Pagination inputs and the page metadata reported back to clients.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 0-based page index
    pub page: u64,
    /// items per page
    pub size: u64,
}

impl Pagination {
    /// Clamp the page size to a sane range
    pub fn normalize(self) -> (u64, u64) {
        (self.page, self.size.clamp(1, 100))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 0, size: 10 } }
}

/// Page metadata computed alongside a page of results.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
}

impl PageInfo {
    pub fn new(page: u64, size: u64, total_elements: u64, total_pages: u64) -> Self {
        Self {
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: total_pages == 0 || page + 1 >= total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        !self.last
    }

    pub fn has_prev(&self) -> bool {
        !self.first && self.total_pages > 0
    }
}
