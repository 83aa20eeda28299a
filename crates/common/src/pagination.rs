//! Pagination options for listing queries.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 1-indexed pagination options.
///
/// Both fields are required: callers that omit them are rejected at the
/// controller layer, no defaults are substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Pagination {
    /// Page number, starting at 1.
    #[validate(range(min = 1))]
    pub page: u64,
    /// Page size.
    #[validate(range(min = 1))]
    pub limit: u64,
}

impl Pagination {
    /// Create pagination options.
    #[must_use]
    pub const fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Number of records to skip: `(page - 1) * limit`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_zero_for_first_page() {
        assert_eq!(Pagination::new(1, 20).offset(), 0);
    }

    #[test]
    fn test_offset_skips_previous_pages() {
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn test_page_and_limit_are_required_to_be_positive() {
        assert!(Pagination::new(0, 10).validate().is_err());
        assert!(Pagination::new(1, 0).validate().is_err());
        assert!(Pagination::new(1, 1).validate().is_ok());
    }
}
