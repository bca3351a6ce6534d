//! Paginated fetch-all implementation

use super::types::FetcherConfig;
use crate::error::{FetchError, PageFailure, SourceError};
use crate::limit::MapLimit;
use crate::source::PageSource;
use crate::types::{FetchReport, FetchStats, Page, PageNumber, FIRST_PAGE};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Fetches all pages of a source with bounded concurrency
#[derive(Debug, Clone, Default)]
pub struct PaginatedFetcher {
    config: FetcherConfig,
}

impl PaginatedFetcher {
    /// Create a fetcher with the given config
    pub fn new(config: FetcherConfig) -> Self {
        Self { config }
    }

    /// Create a fetcher with a concurrency limit and default settings otherwise
    pub fn with_concurrency(concurrency: usize) -> Self {
        Self::new(FetcherConfig::new().with_concurrency(concurrency))
    }

    /// Get the fetcher config
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch every page and return the items in ascending page order
    pub async fn fetch_all<S>(&self, source: &S) -> Result<Vec<S::Item>, FetchError>
    where
        S: PageSource + ?Sized,
    {
        self.fetch(source).await.map(|report| report.items)
    }

    /// Fetch every page and return the items together with statistics
    pub async fn fetch<S>(&self, source: &S) -> Result<FetchReport<S::Item>, FetchError>
    where
        S: PageSource + ?Sized,
    {
        let start = Instant::now();
        let mut stats = FetchStats::default();

        // Probe: the only request in flight, and the source of the page count
        stats.add_request();
        let probe = self
            .request(source, None)
            .await
            .map_err(|err| FetchError::Probe { source: err })?;
        stats.add_settled(true);
        stats.peak_in_flight = 1;

        let total_pages = probe.total_pages;
        stats.total_pages = total_pages;
        debug!(
            "Probe returned {} items, {} total pages",
            probe.items.len(),
            total_pages
        );

        if total_pages <= FIRST_PAGE {
            let items = if total_pages == 0 {
                Vec::new()
            } else {
                probe.items
            };
            return Ok(finish(items, stats, start));
        }

        let remaining = (FIRST_PAGE + 1)..=total_pages;
        debug!(
            "Fetching pages {}..={} with concurrency {}",
            remaining.start(),
            remaining.end(),
            self.config.concurrency
        );

        let settled = MapLimit::new(self.config.concurrency)
            .run(remaining, |page| async move {
                (page, self.request(source, Some(page)).await)
            })
            .await;
        stats.peak_in_flight = settled.peak_in_flight.max(1);

        let mut results: BTreeMap<PageNumber, Result<Vec<S::Item>, SourceError>> =
            BTreeMap::new();
        results.insert(FIRST_PAGE, Ok(probe.items));

        for (page, result) in settled.outputs {
            stats.add_request();
            stats.add_settled(result.is_ok());
            let entry = result.map(|fetched| {
                if fetched.total_pages != total_pages {
                    warn!(
                        "Page {} reported {} total pages, keeping probe value {}",
                        page, fetched.total_pages, total_pages
                    );
                }
                fetched.items
            });
            results.insert(page, entry);
        }

        let mut items = Vec::new();
        let mut failures = Vec::new();
        for (page, result) in results {
            match result {
                Ok(page_items) => items.extend(page_items),
                Err(error) => {
                    warn!("Page {page} failed: {error}");
                    failures.push(PageFailure { page, error });
                }
            }
        }

        if let Some(err) = FetchError::from_failures(failures) {
            return Err(err);
        }

        Ok(finish(items, stats, start))
    }

    /// Issue one `get_page` call, applying the page timeout if configured
    async fn request<S>(
        &self,
        source: &S,
        page: Option<PageNumber>,
    ) -> Result<Page<S::Item>, SourceError>
    where
        S: PageSource + ?Sized,
    {
        match self.config.page_timeout {
            Some(timeout) => tokio::time::timeout(timeout, source.get_page(page))
                .await
                .map_err(|_| SourceError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })?,
            None => source.get_page(page).await,
        }
    }
}

fn finish<T>(items: Vec<T>, mut stats: FetchStats, start: Instant) -> FetchReport<T> {
    stats.items = items.len();
    stats.set_duration(start.elapsed());
    info!(
        "Fetched {} items from {} pages in {}ms",
        stats.items, stats.total_pages, stats.duration_ms
    );
    FetchReport { items, stats }
}

/// Fetch every page of `source` with at most `concurrency_limit` page
/// requests outstanding after the probe.
///
/// ```rust
/// # tokio_test::block_on(async {
/// use paged_fetch::pagination::fetch_all;
/// use paged_fetch::source::MemorySource;
///
/// let source = MemorySource::new((1..=8).collect::<Vec<u32>>(), 3);
/// let items = fetch_all(&source, 2).await.unwrap();
/// assert_eq!(items, (1..=8).collect::<Vec<u32>>());
/// # });
/// ```
pub async fn fetch_all<S>(source: &S, concurrency_limit: usize) -> Result<Vec<S::Item>, FetchError>
where
    S: PageSource + ?Sized,
{
    PaginatedFetcher::with_concurrency(concurrency_limit)
        .fetch_all(source)
        .await
}
