//! Error types for paged-fetch
//!
//! Three layers:
//! - [`SourceError`] is what a [`PageSource`](crate::source::PageSource) reports for one call.
//! - [`FetchError`] is what a fetch-all reports; it names the failing page(s).
//! - [`Error`] is the crate-level error used by configuration and the CLI.

use crate::types::{PageNumber, FIRST_PAGE};
use thiserror::Error;

// ============================================================================
// Source Errors
// ============================================================================

/// Failure of a single `get_page` call
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("{message}")]
    Other { message: String },
}

impl SourceError {
    /// Create a generic source error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error came from a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

// ============================================================================
// Fetch Errors
// ============================================================================

/// A page task that settled with an error
#[derive(Error, Debug)]
#[error("page {page}: {error}")]
pub struct PageFailure {
    /// Page number that failed
    pub page: PageNumber,
    /// Underlying cause
    #[source]
    pub error: SourceError,
}

/// Failure of a whole fetch-all operation
#[derive(Error, Debug)]
pub enum FetchError {
    /// The probe request failed, so the page count is unknown
    #[error("Probe request (page 1) failed: {source}")]
    Probe {
        #[source]
        source: SourceError,
    },

    /// One or more page tasks failed after every task settled
    #[error("Failed to fetch {first}{}", others_suffix(.others))]
    Pages {
        /// Lowest-numbered failing page
        #[source]
        first: PageFailure,
        /// Remaining failures, ascending by page number
        others: Vec<PageFailure>,
    },
}

fn others_suffix(others: &[PageFailure]) -> String {
    match others.len() {
        0 => String::new(),
        1 => " (and 1 other page)".to_string(),
        n => format!(" (and {n} other pages)"),
    }
}

impl FetchError {
    /// Build a page failure error from settled failures.
    ///
    /// Returns `None` when `failures` is empty.
    pub fn from_failures(mut failures: Vec<PageFailure>) -> Option<Self> {
        failures.sort_by_key(|f| f.page);
        let mut failures = failures.into_iter();
        let first = failures.next()?;
        Some(Self::Pages {
            first,
            others: failures.collect(),
        })
    }

    /// Page numbers that failed, ascending. A probe failure is page 1.
    pub fn failed_pages(&self) -> Vec<PageNumber> {
        match self {
            Self::Probe { .. } => vec![FIRST_PAGE],
            Self::Pages { first, others } => std::iter::once(first.page)
                .chain(others.iter().map(|f| f.page))
                .collect(),
        }
    }

    /// Check if the probe request failed
    pub fn is_probe(&self) -> bool {
        matches!(self, Self::Probe { .. })
    }
}

// ============================================================================
// Crate Errors
// ============================================================================

/// The main error type for paged-fetch
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for paged-fetch
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
