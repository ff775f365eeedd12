//! Pagination request and result types.

use serde::{Deserialize, Serialize};

use super::Plan;

/// Page index used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_LIMIT: u64 = 10;

/// A normalized, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Coerces raw values, substituting defaults for missing or non-positive
    /// inputs.
    ///
    /// ```rust
    /// use opbook_core::models::PageRequest;
    ///
    /// let request = PageRequest::new(Some(0), Some(-5));
    /// assert_eq!(request, PageRequest { page: 1, limit: 10 });
    /// assert_eq!(PageRequest::new(Some(3), Some(20)).offset(), 40);
    /// ```
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let positive = |value: Option<i64>| value.filter(|v| *v > 0).map(|v| v as u64);
        Self {
            page: positive(page).unwrap_or(DEFAULT_PAGE),
            limit: positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of records skipped before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of search results.
///
/// Note that `page` is the total number of pages for the query, not the
/// index of the page returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanPage {
    /// Number of plans matching the filter, ignoring pagination
    pub total: u64,

    /// Whether plans exist beyond the requested page
    pub has_next: bool,

    /// Total page count
    pub page: u64,

    /// Plans on the requested page
    pub data: Vec<Plan>,
}

impl PlanPage {
    /// Packages a fetched page together with the pagination arithmetic.
    pub fn new(total: u64, request: PageRequest, data: Vec<Plan>) -> Self {
        Self {
            total,
            has_next: total > request.page.saturating_mul(request.limit),
            page: total.div_ceil(request.limit),
            data,
        }
    }
}
