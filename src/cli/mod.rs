//! CLI module
//!
//! Command-line interface for fetching paginated data files.
//!
//! # Commands
//!
//! - `fetch` - Fetch every page and print all items in page order
//! - `page` - Print a single page with the total page count

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
