//! Offset-based pagination types for queue listing endpoints.
//!
//! Review queues are paginated with `page`/`pageSize` query arguments.
//! Pages are 1-based; the database fetches one extra row to detect whether
//! a further page exists.
//!
//! # Usage
//!
//! ```rust,ignore
//! // In a route handler
//! let args = PageArgs { page: Some(2), page_size: Some(50) };
//! let validated = args.validate()?;
//!
//! // In a store
//! let rows = store.list_pending(kind, &validated).await?;
//!
//! // Build the response envelope
//! let page = Page::from_rows(rows, &validated);
//! ```

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i32 = 25;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i32 = 100;

// ============================================================================
// Pagination Arguments
// ============================================================================

/// Raw `page`/`pageSize` query arguments as they arrive on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageArgs {
    /// 1-based page number.
    pub page: Option<i32>,
    /// Number of items per page.
    pub page_size: Option<i32>,
}

impl PageArgs {
    /// Validate pagination arguments.
    ///
    /// Returns validated args with defaults applied and bounds clamped.
    pub fn validate(&self) -> Result<ValidatedPageArgs, &'static str> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err("page must be at least 1");
        }

        // Get page size with default (25) and bounds (1-100)
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

        Ok(ValidatedPageArgs { page, page_size })
    }
}

/// Validated and normalized pagination arguments.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPageArgs {
    /// 1-based page number.
    pub page: i32,
    /// Number of items per page (1-100, default 25).
    pub page_size: i32,
}

impl ValidatedPageArgs {
    /// Get the SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        ((self.page - 1) as i64) * (self.page_size as i64)
    }

    /// Get the SQL LIMIT value (page_size + 1 to detect has_more).
    pub fn fetch_limit(&self) -> i64 {
        (self.page_size + 1) as i64
    }
}

impl Default for ValidatedPageArgs {
    fn default() -> Self {
        ValidatedPageArgs {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ============================================================================
// Page envelope
// ============================================================================

/// A single page of results with position metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i32,
    pub page_size: i32,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from rows fetched with [`ValidatedPageArgs::fetch_limit`].
    ///
    /// Queries fetch `page_size + 1` rows; the extra row signals a further
    /// page and is trimmed from the result.
    pub fn from_rows(rows: Vec<T>, args: &ValidatedPageArgs) -> Self {
        let (items, has_more) = trim_results(rows, args.page_size);
        Page {
            items,
            page: args.page,
            page_size: args.page_size,
            has_more,
        }
    }

    /// Create an empty page.
    pub fn empty(args: &ValidatedPageArgs) -> Self {
        Page {
            items: Vec::new(),
            page: args.page,
            page_size: args.page_size,
            has_more: false,
        }
    }

    /// Map the items while keeping position metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            has_more: self.has_more,
        }
    }
}

/// Trim results to the requested page size and determine if there are more.
///
/// Database queries should fetch `page_size + 1` items. This function trims
/// to the actual size and returns whether there were more items.
pub fn trim_results<T>(results: Vec<T>, page_size: i32) -> (Vec<T>, bool) {
    let has_more = results.len() > page_size as usize;
    let results = if has_more {
        results.into_iter().take(page_size as usize).collect()
    } else {
        results
    };
    (results, has_more)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_args_validate_defaults() {
        let args = PageArgs::default();
        let validated = args.validate().unwrap();
        assert_eq!(validated.page, 1);
        assert_eq!(validated.page_size, 25);
    }

    #[test]
    fn test_page_args_validate_clamps() {
        let args = PageArgs {
            page: Some(3),
            page_size: Some(500),
        };
        let validated = args.validate().unwrap();
        assert_eq!(validated.page_size, 100);

        let args = PageArgs {
            page: Some(1),
            page_size: Some(0),
        };
        let validated = args.validate().unwrap();
        assert_eq!(validated.page_size, 1);
    }

    #[test]
    fn test_page_args_validate_rejects_zero_page() {
        let args = PageArgs {
            page: Some(0),
            page_size: None,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_offset_and_fetch_limit() {
        let args = ValidatedPageArgs {
            page: 3,
            page_size: 20,
        };
        assert_eq!(args.offset(), 40);
        assert_eq!(args.fetch_limit(), 21);
    }

    #[test]
    fn test_trim_results() {
        let items: Vec<i32> = (1..=12).collect();
        let (trimmed, has_more) = trim_results(items, 10);
        assert_eq!(trimmed.len(), 10);
        assert!(has_more);

        let items: Vec<i32> = (1..=5).collect();
        let (trimmed, has_more) = trim_results(items, 10);
        assert_eq!(trimmed.len(), 5);
        assert!(!has_more);
    }

    #[test]
    fn test_page_from_rows() {
        let args = ValidatedPageArgs {
            page: 2,
            page_size: 3,
        };
        let page = Page::from_rows(vec![1, 2, 3, 4], &args);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.page, 2);
        assert!(page.has_more);

        let page = Page::from_rows(vec![1, 2], &args);
        assert_eq!(page.items, vec![1, 2]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let args = ValidatedPageArgs::default();
        let page = Page::from_rows(vec![1], &args);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("pageSize").is_some());
        assert!(json.get("hasMore").is_some());
    }
}
