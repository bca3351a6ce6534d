//! Integration tests
//!
//! Tests the full flow: data file → page source → bounded-concurrency fetch → ordered items

use async_trait::async_trait;
use paged_fetch::config::FetchConfig;
use paged_fetch::source::{
    FileSource, MemorySource, RateLimitedSource, RateLimiter, RateLimiterConfig,
};
use paged_fetch::{
    fetch_all, map_limit, FetchError, FetcherConfig, Page, PageNumber, PageSource,
    PaginatedFetcher, SourceError,
};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

fn data_file(lines: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for i in 1..=lines {
        writeln!(file, "item-{i:02}").unwrap();
    }
    file
}

fn expected_lines(lines: usize) -> Vec<String> {
    (1..=lines).map(|i| format!("item-{i:02}")).collect()
}

/// Counts calls and concurrent calls of an inner source
struct Instrumented<S> {
    inner: S,
    calls: AtomicUsize,
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl<S> Instrumented<S> {
    fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl<S: PageSource> PageSource for Instrumented<S> {
    type Item = S::Item;

    async fn get_page(&self, page: Option<PageNumber>) -> Result<Page<S::Item>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        let result = self.inner.get_page(page).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

// ============================================================================
// File Source End-to-End
// ============================================================================

#[tokio::test]
async fn test_fetch_file_in_page_order() {
    let file = data_file(10);
    let source = Instrumented::new(
        FileSource::new(file.path()).with_delay(Duration::from_millis(20)),
    );

    let items = fetch_all(&source, 2).await.unwrap();

    assert_eq!(items, expected_lines(10));
    // ceil(10 / 3) pages, one call each
    assert_eq!(source.calls.load(Ordering::SeqCst), 4);
    assert!(source.peak.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_fetch_empty_file() {
    let file = NamedTempFile::new().unwrap();
    let source = Instrumented::new(FileSource::new(file.path()));

    let items = fetch_all(&source, 2).await.unwrap();

    assert!(items.is_empty());
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_fetch_single_page_file() {
    let file = data_file(2);
    let source = Instrumented::new(FileSource::new(file.path()));

    let items = fetch_all(&source, 4).await.unwrap();

    assert_eq!(items, expected_lines(2));
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_sliding_window_is_faster_than_sequential() {
    let file = data_file(12);
    let source = FileSource::new(file.path())
        .with_page_size(2)
        .with_delay(Duration::from_millis(40));

    // Probe + 5 remaining pages at 40ms each
    let start = Instant::now();
    let sequential = fetch_all(&source, 1).await.unwrap();
    let sequential_elapsed = start.elapsed();

    let start = Instant::now();
    let parallel = fetch_all(&source, 5).await.unwrap();
    let parallel_elapsed = start.elapsed();

    assert_eq!(sequential, parallel);
    assert!(sequential_elapsed >= Duration::from_millis(240));
    assert!(parallel_elapsed < sequential_elapsed);
}

// ============================================================================
// Config-Driven Fetch
// ============================================================================

#[tokio::test]
async fn test_fetch_from_config() {
    let file = data_file(7);
    let yaml = format!(
        "source:\n  path: {}\n  page_size: 2\nfetch:\n  concurrency: 3\n  page_timeout_ms: 1000\n",
        file.path().display()
    );
    let config = FetchConfig::from_yaml_str(&yaml).unwrap();

    let source = config.file_source().unwrap();
    let report = PaginatedFetcher::new(config.fetcher_config())
        .fetch(&source)
        .await
        .unwrap();

    assert_eq!(report.items, expected_lines(7));
    assert_eq!(report.stats.total_pages, 4);
    assert_eq!(report.stats.requests, 4);
    assert!(report.stats.peak_in_flight <= 3);
}

// ============================================================================
// Shared and Wrapped Sources
// ============================================================================

#[tokio::test]
async fn test_shared_rate_limiter_across_sources() {
    let limiter = RateLimiter::new(&RateLimiterConfig::new(20, 2));
    let a = RateLimitedSource::with_limiter(
        MemorySource::new((1..=4).collect::<Vec<u32>>(), 1),
        limiter.clone(),
    );
    let b = RateLimitedSource::with_limiter(
        MemorySource::new((5..=8).collect::<Vec<u32>>(), 1),
        limiter,
    );

    let start = Instant::now();
    let (left, right) = tokio::join!(fetch_all(&a, 4), fetch_all(&b, 4));

    assert_eq!(left.unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(right.unwrap(), vec![5, 6, 7, 8]);
    // 8 calls, burst of 2, then one every 50ms
    assert!(start.elapsed() >= Duration::from_millis(250));
}

#[tokio::test]
async fn test_concurrent_fetches_share_a_source() {
    let source = Arc::new(MemorySource::new((0..100).collect::<Vec<u32>>(), 7));

    let fetches = (1..=3).map(|limit| fetch_all(&source, limit));
    let results = futures::future::join_all(fetches).await;

    for items in results {
        assert_eq!(items.unwrap(), (0..100).collect::<Vec<_>>());
    }
}

// ============================================================================
// Failure Propagation
// ============================================================================

/// Fails one page of an in-memory dataset
struct FlakyPage {
    inner: MemorySource<u32>,
    bad_page: PageNumber,
    calls: AtomicUsize,
}

#[async_trait]
impl PageSource for FlakyPage {
    type Item = u32;

    async fn get_page(&self, page: Option<PageNumber>) -> Result<Page<u32>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if page == Some(self.bad_page) {
            return Err(SourceError::other("connection reset"));
        }
        self.inner.get_page(page).await
    }
}

#[tokio::test]
async fn test_failing_page_fails_whole_fetch() {
    let source = FlakyPage {
        inner: MemorySource::new((1..=12).collect(), 2),
        bad_page: 4,
        calls: AtomicUsize::new(0),
    };

    let err = PaginatedFetcher::new(FetcherConfig::new().with_concurrency(2))
        .fetch_all(&source)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Pages { .. }));
    assert_eq!(err.failed_pages(), vec![4]);
    assert_eq!(err.to_string(), "Failed to fetch page 4: connection reset");
    assert_eq!(source.calls.load(Ordering::SeqCst), 6);

    // Converts into the crate-level error unchanged
    let err: paged_fetch::Error = err.into();
    assert_eq!(err.to_string(), "Failed to fetch page 4: connection reset");
}

// ============================================================================
// Scheduler As a Standalone Unit
// ============================================================================

#[tokio::test]
async fn test_map_limit_over_file_pages() {
    let file = data_file(9);
    let source = FileSource::new(file.path());

    let pages = map_limit([3u32, 1, 2], 2, |page| {
        let source = &source;
        async move { source.get_page(Some(page)).await.unwrap().items }
    })
    .await;

    assert_eq!(pages[0], vec!["item-07", "item-08", "item-09"]);
    assert_eq!(pages[1], vec!["item-01", "item-02", "item-03"]);
    assert_eq!(pages[2], vec!["item-04", "item-05", "item-06"]);
}
