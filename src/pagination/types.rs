//! Fetcher configuration

use std::time::Duration;

/// Page requests allowed in flight when none is configured
pub const DEFAULT_CONCURRENCY: usize = 2;

/// Configuration for a [`PaginatedFetcher`](super::PaginatedFetcher)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Maximum page requests outstanding at once (after the probe)
    pub concurrency: usize,
    /// Optional timeout applied to each `get_page` call
    pub page_timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            page_timeout: None,
        }
    }
}

impl FetcherConfig {
    /// Create a default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit (zero is treated as one)
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set a per-page timeout
    #[must_use]
    pub fn with_page_timeout(mut self, timeout: Duration) -> Self {
        self.page_timeout = Some(timeout);
        self
    }
}
