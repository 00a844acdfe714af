//! market-scraper - concurrent market listing scraper
//!
//! Fetches a set of listing pages through a bounded worker pool, extracts
//! one record per table row or ticker block, and writes every record to a
//! text file in page order regardless of which page finished first.

// Module declarations
pub mod application;
pub mod cli;
pub mod crawling;
pub mod domain;
pub mod infrastructure;

pub use application::{ScrapeSummary, run_scrape};
pub use infrastructure::config::{AppConfig, ConfigManager};
