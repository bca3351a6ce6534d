// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # paged-fetch
//!
//! Fetch every page of a paginated resource with a bounded number of
//! requests in flight.
//!
//! ## Features
//!
//! - **Probe-first pagination**: one request for the first page discovers the page count
//! - **Sliding-window concurrency**: at most N page requests outstanding, refilled on completion
//! - **Ordered results**: items come back in page order whatever the completion order
//! - **All-or-nothing errors**: every page settles, then any failure fails the whole fetch
//! - **Pluggable sources**: in-memory, line-oriented files, rate-limited wrappers
//!
//! ## Quick Start
//!
//! ```rust
//! use paged_fetch::pagination::PaginatedFetcher;
//! use paged_fetch::source::MemorySource;
//!
//! # tokio_test::block_on(async {
//! let source = MemorySource::new(vec!["a", "b", "c", "d", "e"], 2);
//!
//! let fetcher = PaginatedFetcher::with_concurrency(2);
//! let items = fetcher.fetch_all(&source).await?;
//!
//! assert_eq!(items, vec!["a", "b", "c", "d", "e"]);
//! # Ok::<(), paged_fetch::FetchError>(())
//! # }).unwrap();
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                    PaginatedFetcher                       │
//! │  probe get_page(None) → total_pages → pages 2..=total     │
//! └───────────────────────────────────────────────────────────┘
//!                │                              │
//! ┌──────────────┴──────────────┐ ┌─────────────┴─────────────┐
//! │        limit::MapLimit      │ │        PageSource         │
//! ├─────────────────────────────┤ ├───────────────────────────┤
//! │ pending queue               │ │ MemorySource              │
//! │ N in-flight slots           │ │ FileSource                │
//! │ refill on every completion  │ │ RateLimitedSource         │
//! └─────────────────────────────┘ └───────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bounded-concurrency scheduling
pub mod limit;

/// Page source contract and implementations
pub mod source;

/// Paginated fetch-all
pub mod pagination;

/// Run configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, FetchError, PageFailure, Result, SourceError};
pub use types::*;

// Re-export commonly used types
pub use limit::map_limit;
pub use pagination::{fetch_all, FetcherConfig, PaginatedFetcher};
pub use source::PageSource;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
