//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bounded-concurrency paginated fetch CLI
#[derive(Parser, Debug)]
#[command(name = "paged-fetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Line-oriented data file (overrides source.path)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Lines per page (overrides source.page_size)
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Artificial delay before each page read, in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Output format
    #[arg(long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every page and print all items in page order
    Fetch {
        /// Maximum page requests in flight after the probe
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Per-page timeout in milliseconds
        #[arg(long)]
        page_timeout_ms: Option<u64>,

        /// Limit page requests per second
        #[arg(long)]
        rate_limit: Option<u32>,

        /// Print fetch statistics after the items
        #[arg(long)]
        stats: bool,
    },

    /// Print one page (the first if no number is given)
    Page {
        /// Page number, starting at 1
        page: Option<u32>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Human-readable output
    Pretty,
}
