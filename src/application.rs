//! Application layer module
//!
//! Use cases that wire configuration, fetch strategy, parser and output
//! together for one run.

pub mod scrape_service;

pub use scrape_service::{ScrapeSummary, run_scrape};
