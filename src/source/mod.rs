//! Page sources
//!
//! Supports: in-memory datasets, line-oriented text files, rate-limited wrappers
//!
//! # Overview
//!
//! A [`PageSource`] answers one question: "give me page N (or the first
//! page) and tell me how many pages there are". The fetcher only depends on
//! that contract; how the pages are produced is up to the implementation.

mod file;
mod memory;
mod rate_limit;
mod types;

pub use file::{FileSource, DEFAULT_PAGE_SIZE};
pub use memory::MemorySource;
pub use rate_limit::{RateLimitedSource, RateLimiter, RateLimiterConfig};
pub use types::PageSource;
