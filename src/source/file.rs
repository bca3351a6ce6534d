//! Line-oriented text file source
//!
//! Each non-trailing line of the file is one item. The file is re-read on
//! every call, so edits between calls are visible to later pages.

use super::types::PageSource;
use crate::error::SourceError;
use crate::types::{page_bounds, page_count, Page, PageNumber, FIRST_PAGE};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Lines per page when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Serves the lines of a text file in pages
#[derive(Debug, Clone)]
pub struct FileSource {
    /// Path to the data file
    path: PathBuf,
    /// Lines per page
    page_size: usize,
    /// Artificial delay applied before every read
    delay: Option<Duration>,
}

impl FileSource {
    /// Create a source for `path` with the default page size
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            page_size: DEFAULT_PAGE_SIZE,
            delay: None,
        }
    }

    /// Set lines per page (zero is treated as one)
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Delay every call by `delay` before reading the file
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = (!delay.is_zero()).then_some(delay);
        self
    }

    /// Path to the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Read the file and split it into lines
    async fn read_lines(&self) -> Result<Vec<String>, SourceError> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        Ok(split_lines(&contents))
    }
}

/// Split file contents into items.
///
/// Surrounding whitespace is trimmed first, so a blank file has no items.
pub(crate) fn split_lines(contents: &str) -> Vec<String> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

#[async_trait]
impl PageSource for FileSource {
    type Item = String;

    async fn get_page(&self, page: Option<PageNumber>) -> Result<Page<String>, SourceError> {
        let page = page.unwrap_or(FIRST_PAGE);
        debug!("get_page {} from {}", page, self.path.display());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let lines = self.read_lines().await?;
        let total_pages = page_count(lines.len(), self.page_size);
        let (start, end) = page_bounds(page, self.page_size, lines.len());

        Ok(Page::new(lines[start..end].to_vec(), total_pages))
    }
}
