//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::infrastructure::config::{AppConfig, FetchStrategy, SiteProfile};

#[derive(Parser, Debug)]
#[command(name = "market-scraper")]
#[command(about = "Scrape paginated market listings concurrently and write them in page order")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file (defaults to the user config directory)
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,

    /// Write a default configuration file to CONFIG_PATH (or the default location) and exit
    #[arg(long)]
    pub init: bool,

    /// Site layout to scrape
    #[arg(short, long, value_enum)]
    pub profile: Option<ProfileArg>,

    /// Output file path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of listing pages to fetch
    #[arg(long, value_name = "N")]
    pub pages: Option<u32>,

    /// Worker pool size
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Load pages in headless Chrome instead of plain HTTP
    #[arg(long)]
    pub browser: bool,

    /// Log level override ("error" .. "trace")
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileArg {
    CoinTable,
    QuoteTicker,
}

impl From<ProfileArg> for SiteProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::CoinTable => Self::CoinTable,
            ProfileArg::QuoteTicker => Self::QuoteTicker,
        }
    }
}

impl Cli {
    /// Command line flags take precedence over file and environment settings
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(profile) = self.profile {
            config.scrape.profile = profile.into();
        }
        if let Some(output) = &self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(pages) = self.pages {
            config.scrape.page_count = pages;
        }
        if let Some(workers) = self.workers {
            config.scrape.max_workers = Some(workers);
        }
        if self.browser {
            config.scrape.fetch_strategy = FetchStrategy::Browser;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}
