//! Pagination query parameters and response metadata.

use serde::{Deserialize, Serialize};

/// Default page size when none is requested.
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on requested page size.
const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PaginationQuery {
    /// Returns `(page, page_size)` clamped to sane bounds.
    ///
    /// Pages are 1-indexed; out-of-range values fall back to defaults
    /// rather than erroring.
    pub fn sanitize(&self) -> (i64, i64) {
        let page = self.page.filter(|p| *p >= 1).unwrap_or(1);
        let page_size = self
            .page_size
            .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        (page, page_size)
    }
}

/// Pagination metadata included in list responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_defaults() {
        let query = PaginationQuery {
            page: None,
            page_size: None,
        };
        assert_eq!(query.sanitize(), (1, 20));
    }

    #[test]
    fn test_sanitize_clamps_invalid_values() {
        let query = PaginationQuery {
            page: Some(0),
            page_size: Some(500),
        };
        assert_eq!(query.sanitize(), (1, 20));

        let query = PaginationQuery {
            page: Some(-3),
            page_size: Some(0),
        };
        assert_eq!(query.sanitize(), (1, 20));
    }

    #[test]
    fn test_sanitize_passes_valid_values() {
        let query = PaginationQuery {
            page: Some(3),
            page_size: Some(50),
        };
        assert_eq!(query.sanitize(), (3, 50));
    }
}
