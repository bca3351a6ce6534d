//! Configuration for fetch runs
//!
//! A run is described by a YAML document with three optional sections:
//!
//! ```yaml
//! source:
//!   path: data.txt
//!   page_size: 3
//!   delay_ms: 0
//! fetch:
//!   concurrency: 2
//!   page_timeout_ms: ~
//! rate_limit:
//!   requests_per_second: 10
//!   burst_size: 10
//! ```

use crate::error::{Error, Result};
use crate::pagination::{FetcherConfig, DEFAULT_CONCURRENCY};
use crate::source::{FileSource, RateLimiterConfig, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete fetch run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Data source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Fetcher settings
    #[serde(default)]
    pub fetch: FetchSettings,

    /// Optional rate limit on page requests
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl FetchConfig {
    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check that values are usable
    pub fn validate(&self) -> Result<()> {
        if self.source.page_size == 0 {
            return Err(Error::invalid_value("source.page_size", "must be at least 1"));
        }
        if self.fetch.concurrency == 0 {
            return Err(Error::invalid_value("fetch.concurrency", "must be at least 1"));
        }
        if self.fetch.page_timeout_ms == Some(0) {
            return Err(Error::invalid_value(
                "fetch.page_timeout_ms",
                "must be greater than 0",
            ));
        }
        if let Some(rate) = &self.rate_limit {
            if rate.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be at least 1",
                ));
            }
        }
        Ok(())
    }

    /// Build the fetcher config
    pub fn fetcher_config(&self) -> FetcherConfig {
        let mut config = FetcherConfig::new().with_concurrency(self.fetch.concurrency);
        if let Some(ms) = self.fetch.page_timeout_ms {
            config = config.with_page_timeout(Duration::from_millis(ms));
        }
        config
    }

    /// Build the file source, if a path is configured
    pub fn file_source(&self) -> Result<FileSource> {
        let path = self.source.path.as_ref().ok_or_else(|| {
            Error::config("No data file configured (set source.path or use --file)")
        })?;

        let mut source = FileSource::new(path).with_page_size(self.source.page_size);
        if self.source.delay_ms > 0 {
            source = source.with_delay(Duration::from_millis(self.source.delay_ms));
        }
        Ok(source)
    }
}

// ============================================================================
// Source Config
// ============================================================================

/// Data source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Line-oriented data file
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Lines per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Artificial delay before every page read, in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            page_size: default_page_size(),
            delay_ms: 0,
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

// ============================================================================
// Fetch Settings
// ============================================================================

/// Fetcher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Maximum page requests in flight after the probe
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-page timeout in milliseconds
    #[serde(default)]
    pub page_timeout_ms: Option<u64>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            page_timeout_ms: None,
        }
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}
