//! Pagination value objects shared by the query operations

use serde::{Deserialize, Serialize};

const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 100;

/// A page request as it arrives from the caller.
///
/// Page numbers are one-based. Out-of-range values are clamped rather than
/// rejected so that listing endpoints never fail on a bad page parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Number of items to skip
    pub fn offset(&self) -> u64 {
        (self.page.max(1) as u64 - 1) * self.limit()
    }

    /// Number of items per page
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PER_PAGE) as u64
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageInfo {
    /// Derives page metadata from the request and the total item count.
    pub fn from_total(request: PageRequest, total: u64) -> Self {
        let limit = request.limit();
        let page = request.page.max(1);
        let total_pages = total.div_ceil(limit) as u32;
        Self {
            current_page: page,
            total_pages,
            total,
            has_next_page: (page as u64) * limit < total,
            has_prev_page: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_page_request() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 10);
    }

    #[test]
    fn test_offset_for_later_page() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.offset(), 20);
    }

    #[test]
    fn test_page_info_from_total() {
        let info = PageInfo::from_total(PageRequest::new(2, 10), 25);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next_page);
        assert!(info.has_prev_page);
    }

    #[test]
    fn test_page_info_single_page() {
        let info = PageInfo::from_total(PageRequest::default(), 4);
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next_page);
        assert!(!info.has_prev_page);
    }

    proptest! {
        #[test]
        fn prop_limit_is_always_bounded(page in 0u32..10_000, per_page in 0u32..10_000) {
            let request = PageRequest::new(page, per_page);
            prop_assert!(request.limit() >= 1);
            prop_assert!(request.limit() <= 100);
        }

        #[test]
        fn prop_last_page_has_no_next(total in 0u64..100_000) {
            let request = PageRequest::new(1, 100);
            let info = PageInfo::from_total(request, total);
            if info.total_pages <= 1 {
                prop_assert!(!info.has_next_page);
            }
        }
    }
}
