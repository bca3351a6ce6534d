//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::FetchConfig;
use crate::error::{Result, ResultExt};
use crate::pagination::PaginatedFetcher;
use crate::source::{PageSource, RateLimitedSource, RateLimiterConfig};
use serde_json::json;
use std::io::Write;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, printing to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with_writer(&mut out).await
    }

    /// Run the CLI command, printing to `out`
    pub async fn run_with_writer<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch {
                concurrency,
                page_timeout_ms,
                rate_limit,
                stats,
            } => {
                let mut config = self.load_config()?;
                if let Some(concurrency) = concurrency {
                    config.fetch.concurrency = *concurrency;
                }
                if page_timeout_ms.is_some() {
                    config.fetch.page_timeout_ms = *page_timeout_ms;
                }
                if let Some(rps) = rate_limit {
                    config.rate_limit = Some(RateLimiterConfig::per_second(*rps));
                }
                config.validate()?;
                self.fetch(&config, *stats, out).await
            }
            Commands::Page { page } => {
                let config = self.load_config()?;
                config.validate()?;
                self.page(&config, *page, out).await
            }
        }
    }

    /// Load the config file (if any) and apply global overrides
    fn load_config(&self) -> Result<FetchConfig> {
        let mut config = match &self.cli.config {
            Some(path) => FetchConfig::from_file(path)?,
            None => FetchConfig::default(),
        };

        if let Some(file) = &self.cli.file {
            config.source.path = Some(file.clone());
        }
        if let Some(page_size) = self.cli.page_size {
            config.source.page_size = page_size;
        }
        if let Some(delay_ms) = self.cli.delay_ms {
            config.source.delay_ms = delay_ms;
        }

        debug!("Resolved config: {:?}", config);
        Ok(config)
    }

    /// Build the page source described by `config`
    fn build_source(config: &FetchConfig) -> Result<Box<dyn PageSource<Item = String>>> {
        let file = config.file_source()?;
        let source: Box<dyn PageSource<Item = String>> = match &config.rate_limit {
            Some(rate) => Box::new(RateLimitedSource::new(file, rate)),
            None => Box::new(file),
        };
        Ok(source)
    }

    /// Fetch all pages and print every item
    async fn fetch<W: Write>(
        &self,
        config: &FetchConfig,
        show_stats: bool,
        out: &mut W,
    ) -> Result<()> {
        let source = Self::build_source(config)?;
        let fetcher = PaginatedFetcher::new(config.fetcher_config());

        let report = fetcher.fetch(source.as_ref()).await?;

        match self.cli.format {
            OutputFormat::Json => {
                for item in &report.items {
                    writeln!(out, "{}", serde_json::to_string(item)?)?;
                }
                if show_stats {
                    writeln!(out, "{}", json!({ "stats": report.stats }))?;
                }
            }
            OutputFormat::Pretty => {
                for (index, item) in report.items.iter().enumerate() {
                    writeln!(out, "{:>4}  {item}", index + 1)?;
                }
                writeln!(
                    out,
                    "\n{} items from {} pages ({} requests, peak {} in flight) in {}ms",
                    report.stats.items,
                    report.stats.total_pages,
                    report.stats.requests,
                    report.stats.peak_in_flight,
                    report.stats.duration_ms
                )?;
                if show_stats {
                    writeln!(out, "{}", serde_json::to_string_pretty(&report.stats)?)?;
                }
            }
        }

        Ok(())
    }

    /// Print a single page with its total page count
    async fn page<W: Write>(
        &self,
        config: &FetchConfig,
        page: Option<u32>,
        out: &mut W,
    ) -> Result<()> {
        let source = Self::build_source(config)?;
        let fetched = source
            .get_page(page)
            .await
            .with_context(|| format!("Failed to read page {}", page.unwrap_or(1)))?;

        let body = json!({
            "data": fetched.items,
            "numpages": fetched.total_pages,
        });

        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(&body)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(&body)?,
        };
        writeln!(out, "{text}")?;

        Ok(())
    }
}
