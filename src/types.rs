//! Common types used throughout paged-fetch
//!
//! Shared page and statistics types used by sources, the scheduler and the fetcher.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Type Aliases
// ============================================================================

/// 1-based page number
pub type PageNumber = u32;

/// Page number of the probe request
pub const FIRST_PAGE: PageNumber = 1;

// ============================================================================
// Page
// ============================================================================

/// One chunk of a paginated dataset plus the page count known at fetch time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in source order
    pub items: Vec<T>,
    /// Total number of pages in the dataset
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Create a new page
    pub fn new(items: Vec<T>, total_pages: u32) -> Self {
        Self { items, total_pages }
    }

    /// A page of a dataset with no pages
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
        }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Number of pages needed to hold `item_count` items at `page_size` per page
pub fn page_count(item_count: usize, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    item_count.div_ceil(page_size) as u32
}

/// Index range of the items on `page` (1-based), clamped to `item_count`
pub fn page_bounds(page: PageNumber, page_size: usize, item_count: usize) -> (usize, usize) {
    let page = page.max(FIRST_PAGE) as usize;
    let start = (page - 1).saturating_mul(page_size).min(item_count);
    let end = page.saturating_mul(page_size).min(item_count);
    (start, end)
}

// ============================================================================
// Fetch Statistics
// ============================================================================

/// Statistics for one fetch-all operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchStats {
    /// Total pages reported by the probe
    pub total_pages: u32,
    /// `get_page` calls issued, including the probe
    pub requests: u32,
    /// Pages that settled successfully, including the probe
    pub pages_fetched: u32,
    /// Pages that settled with an error
    pub pages_failed: u32,
    /// Items in the assembled sequence
    pub items: usize,
    /// Highest number of page calls outstanding at once
    pub peak_in_flight: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl FetchStats {
    /// Record an issued request
    pub fn add_request(&mut self) {
        self.requests += 1;
    }

    /// Record a settled page
    pub fn add_settled(&mut self, ok: bool) {
        if ok {
            self.pages_fetched += 1;
        } else {
            self.pages_failed += 1;
        }
    }

    /// Set the elapsed duration
    pub fn set_duration(&mut self, elapsed: Duration) {
        self.duration_ms = elapsed.as_millis() as u64;
    }
}

/// Items of a completed fetch plus its statistics
#[derive(Debug, Clone)]
pub struct FetchReport<T> {
    /// All items, in ascending page order
    pub items: Vec<T>,
    /// Statistics for the operation
    pub stats: FetchStats,
}
