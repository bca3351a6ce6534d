//! In-memory page source

use super::types::PageSource;
use crate::error::SourceError;
use crate::types::{page_bounds, page_count, Page, PageNumber, FIRST_PAGE};
use async_trait::async_trait;

/// Serves a fixed list of items in pages of `page_size`
#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    items: Vec<T>,
    page_size: usize,
}

impl<T> MemorySource<T> {
    /// Create a source over `items`.
    ///
    /// A page size of zero is treated as one.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
        }
    }

    /// Items per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total pages this source reports
    pub fn total_pages(&self) -> u32 {
        page_count(self.items.len(), self.page_size)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> PageSource for MemorySource<T> {
    type Item = T;

    async fn get_page(&self, page: Option<PageNumber>) -> Result<Page<T>, SourceError> {
        let page = page.unwrap_or(FIRST_PAGE);
        let (start, end) = page_bounds(page, self.page_size, self.items.len());
        Ok(Page::new(self.items[start..end].to_vec(), self.total_pages()))
    }
}
