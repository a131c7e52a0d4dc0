use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalized page/limit pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = match limit {
            Some(l) if l < 1 => DEFAULT_PAGE_SIZE,
            Some(l) => l.min(MAX_PAGE_SIZE),
            None => DEFAULT_PAGE_SIZE,
        };
        Self { page, limit }
    }

    /// Rows to skip. Saturates for absurd page numbers so the query
    /// returns an empty page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let pages = (total + request.limit - 1) / request.limit;
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages,
            has_next: request.page < pages,
            has_prev: request.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let req = PageRequest::new(None, None);
        assert_eq!(req, PageRequest { page: 1, limit: DEFAULT_PAGE_SIZE });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_page_request_clamps_out_of_range_values() {
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, limit: 10 });
        assert_eq!(PageRequest::new(Some(-3), Some(500)).limit, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let req = PageRequest::new(Some(i64::MAX), Some(10));
        assert_eq!(req.offset(), i64::MAX);

        let meta = Pagination::new(req, 25);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_pagination_metadata() {
        let meta = Pagination::new(PageRequest::new(Some(2), Some(10)), 25);
        assert_eq!(meta.pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let last = Pagination::new(PageRequest::new(Some(3), Some(10)), 25);
        assert!(!last.has_next);
    }

    #[test]
    fn test_pagination_empty_result() {
        let meta = Pagination::new(PageRequest::new(None, None), 0);
        assert_eq!(meta.pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }
}
