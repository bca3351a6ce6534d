//! Pagination module
//!
//! Fetches every page of a [`PageSource`](crate::source::PageSource).
//!
//! # Overview
//!
//! A fetch-all starts with one probe request for the first page, reads the
//! total page count from it, then fetches pages `2..=total_pages` through the
//! bounded-concurrency scheduler in [`crate::limit`]. Items are assembled in
//! ascending page order regardless of completion order. If any page fails,
//! the whole fetch fails once every page has settled.

mod fetcher;
mod types;

pub use fetcher::{fetch_all, PaginatedFetcher};
pub use types::{FetcherConfig, DEFAULT_CONCURRENCY};
