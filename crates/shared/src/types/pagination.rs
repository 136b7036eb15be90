//! Pagination contract for list operations.
//!
//! Callers pass a 1-indexed `page` and a page size `limit`; repositories
//! receive the derived `offset`/`limit` pair, and the response carries a
//! [`Paging`] block describing the slice that was returned.

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    PaginationConfig::default().default_limit
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(limit: u32, page: u32) -> Self {
        Self { limit, page }
    }

    /// Computes the repository parameters using the default limits.
    #[must_use]
    pub fn compute(self) -> PageParams {
        self.compute_with(&PaginationConfig::default())
    }

    /// Computes `offset = (page - 1) * limit` after normalizing the request.
    ///
    /// Page 0 is treated as page 1, and `limit` is clamped to
    /// `1..=config.max_limit`.
    #[must_use]
    pub fn compute_with(self, config: &PaginationConfig) -> PageParams {
        let page = self.page.max(1);
        let limit = self.limit.clamp(1, config.max_limit.max(1));
        let offset = u64::from(page - 1) * u64::from(limit);

        PageParams {
            offset,
            limit: u64::from(limit),
            paging: Paging {
                page,
                limit,
                offset,
                total: 0,
                total_pages: 0,
            },
        }
    }
}

/// Offset/limit pair handed to repositories, plus the paging block to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum number of rows to return.
    pub limit: u64,
    /// Paging metadata, without the total.
    pub paging: Paging,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Rows skipped before this page.
    pub offset: u64,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl Paging {
    /// Returns a copy with the total item count filled in.
    #[must_use]
    pub fn with_total(self, total: u64) -> Self {
        Self {
            total,
            total_pages: total.div_ceil(u64::from(self.limit.max(1))),
            ..self
        }
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Pagination metadata.
    pub paging: Paging,
    /// The items in the current page.
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Creates a paginated response from a page of items and the total count.
    #[must_use]
    pub fn new(data: Vec<T>, paging: Paging, total: u64) -> Self {
        Self {
            paging: paging.with_total(total),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_page_request_default() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 10);
    }

    #[rstest]
    #[case(10, 1, 0)]
    #[case(10, 2, 10)]
    #[case(25, 3, 50)]
    #[case(10, 0, 0)]
    fn test_offset(#[case] limit: u32, #[case] page: u32, #[case] expected: u64) {
        let params = PageRequest::new(limit, page).compute();
        assert_eq!(params.offset, expected);
        assert_eq!(params.paging.offset, expected);
    }

    #[test]
    fn test_limit_is_clamped() {
        let config = PaginationConfig {
            default_limit: 10,
            max_limit: 50,
        };
        assert_eq!(PageRequest::new(500, 1).compute_with(&config).limit, 50);
        assert_eq!(PageRequest::new(0, 1).compute_with(&config).limit, 1);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 1)]
    #[case(10, 1)]
    #[case(25, 3)]
    fn test_total_pages(#[case] total: u64, #[case] expected: u64) {
        let params = PageRequest::new(10, 1).compute();
        let response: Paginated<i32> = Paginated::new(vec![], params.paging, total);
        assert_eq!(response.paging.total, total);
        assert_eq!(response.paging.total_pages, expected);
    }

    #[test]
    fn test_paginated_serializes_paging_and_data() {
        let params = PageRequest::new(2, 2).compute();
        let response = Paginated::new(vec![3, 4], params.paging, 5);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["paging"]["offset"], 2);
        assert_eq!(json["paging"]["total_pages"], 3);
        assert_eq!(json["data"], serde_json::json!([3, 4]));
    }

    proptest! {
        #[test]
        fn prop_offset_is_page_minus_one_times_limit(limit in 1u32..=100, page in 1u32..10_000) {
            let params = PageRequest::new(limit, page).compute();
            prop_assert_eq!(params.offset, u64::from(page - 1) * u64::from(limit));
            prop_assert_eq!(params.limit, u64::from(limit));
        }
    }
}
