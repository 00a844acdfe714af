//! Configuration infrastructure
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! `MARKET_SCRAPER_*` environment variables. Values that depend on the site
//! profile (base URL, timeout, user agent, output file) stay `None` unless
//! set explicitly and are resolved against the profile when read.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::infrastructure::parsing::ParsingConfig;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What to fetch and how
    pub scrape: ScrapeConfig,

    /// Where merged records are written
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Selector overrides
    pub parsing: ParsingConfig,
}

/// Site layout being scraped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteProfile {
    /// Paginated coin listing table
    #[default]
    CoinTable,
    /// Single-page currency ticker widget
    QuoteTicker,
}

impl SiteProfile {
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::CoinTable => site::COINS_PAGE,
            Self::QuoteTicker => site::TICKER_WIDGET,
        }
    }

    pub const fn default_timeout_seconds(self) -> u64 {
        match self {
            Self::CoinTable => defaults::COIN_TABLE_TIMEOUT_SECONDS,
            Self::QuoteTicker => defaults::QUOTE_TICKER_TIMEOUT_SECONDS,
        }
    }

    pub const fn default_user_agent(self) -> &'static str {
        match self {
            Self::CoinTable => defaults::DESKTOP_USER_AGENT,
            Self::QuoteTicker => defaults::TOOL_USER_AGENT,
        }
    }

    pub const fn default_output_file(self) -> &'static str {
        match self {
            Self::CoinTable => defaults::COIN_TABLE_OUTPUT_FILE,
            Self::QuoteTicker => defaults::QUOTE_TICKER_OUTPUT_FILE,
        }
    }

    /// Whether an empty result is written as a diagnostic line
    pub const fn writes_placeholder_when_empty(self) -> bool {
        matches!(self, Self::QuoteTicker)
    }

    pub const fn is_paginated(self) -> bool {
        matches!(self, Self::CoinTable)
    }
}

/// How page markup is retrieved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Headless Chrome page load (requires the `browser` feature)
    Browser,
}

/// Scrape target and worker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub profile: SiteProfile,

    pub fetch_strategy: FetchStrategy,

    /// First listing page; later pages are derived from it
    pub base_url: Option<String>,

    /// Number of listing pages to fetch (paginated profiles only)
    pub page_count: u32,

    /// Explicit URL list; replaces the derived pagination when non-empty
    pub urls: Vec<String>,

    /// Worker pool size; defaults to one worker per URL, capped
    pub max_workers: Option<usize>,

    /// Request timeout in seconds
    pub request_timeout_seconds: Option<u64>,

    /// User agent string for HTTP requests
    pub user_agent: Option<String>,

    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            profile: SiteProfile::default(),
            fetch_strategy: FetchStrategy::default(),
            base_url: None,
            page_count: defaults::PAGE_COUNT,
            urls: Vec::new(),
            max_workers: None,
            request_timeout_seconds: None,
            user_agent: None,
            follow_redirects: true,
        }
    }
}

impl ScrapeConfig {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.profile.default_base_url())
    }

    /// URLs to fetch, in page order. Index 0 is page 1.
    pub fn page_urls(&self) -> Vec<String> {
        if !self.urls.is_empty() {
            return self.urls.clone();
        }
        if self.profile.is_paginated() {
            utils::page_urls(self.base_url(), self.page_count)
        } else {
            vec![self.base_url().to_string()]
        }
    }

    /// Pool size for `task_count` tasks
    pub fn worker_count(&self, task_count: usize) -> usize {
        self.max_workers
            .unwrap_or_else(|| task_count.min(defaults::MAX_WORKERS))
            .max(1)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_seconds
                .unwrap_or_else(|| self.profile.default_timeout_seconds()),
        )
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or_else(|| self.profile.default_user_agent())
    }
}

/// Output file settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path; defaults to the profile's file name in the working directory
    pub path: Option<PathBuf>,

    /// Write a diagnostic line instead of an empty file; defaults per profile
    pub placeholder_when_empty: Option<bool>,
}

impl OutputConfig {
    pub fn resolved_path(&self, profile: SiteProfile) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(profile.default_output_file()))
    }

    /// Line written when no record was collected, if any
    pub fn empty_placeholder(&self, profile: SiteProfile) -> Option<&'static str> {
        self.placeholder_when_empty
            .unwrap_or_else(|| profile.writes_placeholder_when_empty())
            .then_some(defaults::EMPTY_RESULT_LINE)
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted file logs
    pub json_format: bool,

    /// Enable console output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Log directory; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    /// Log file name inside the log directory
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Reject settings that cannot produce a run
    pub fn validate(&self) -> Result<()> {
        if self.scrape.urls.is_empty() && self.scrape.profile.is_paginated() && self.scrape.page_count == 0 {
            bail!("scrape.page_count must be at least 1 when no explicit urls are configured");
        }
        if self.scrape.max_workers == Some(0) {
            bail!("scrape.max_workers must be at least 1");
        }
        for url in self.scrape.page_urls() {
            url::Url::parse(&url).with_context(|| format!("Invalid scrape URL: {url}"))?;
        }
        if !self.logging.console_output && !self.logging.file_output {
            bail!("No logging output configured");
        }
        Ok(())
    }
}

/// Configuration manager for loading settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Manager reading the default config file location
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    /// Manager reading an explicit config file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    /// Where the loaded settings came from, for the startup log
    pub fn describe_source(&self) -> String {
        if self.config_path.exists() {
            format!("Loaded configuration from: {:?}", self.config_path)
        } else {
            format!("Configuration file not found, using defaults: {:?}", self.config_path)
        }
    }

    /// Load configuration: defaults, then the JSON file if present, then environment
    ///
    /// Runs before logging is installed; log [`Self::describe_source`] afterwards.
    pub fn load_config(&self) -> Result<AppConfig> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(self.config_path.as_path())
                    .format(config::FileFormat::Json)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {:?}", self.config_path))?;

        settings
            .try_deserialize()
            .context("Configuration has an invalid shape")
    }

    /// Write the built-in defaults as a JSON file; an existing file is kept
    pub fn write_default_config(&self) -> Result<()> {
        if self.config_path.exists() {
            bail!("Configuration file already exists: {:?}", self.config_path);
        }
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {parent:?}"))?;
        }

        let json = serde_json::to_string_pretty(&AppConfig::default())
            .context("Failed to serialize default configuration")?;
        std::fs::write(&self.config_path, json)
            .with_context(|| format!("Failed to write {:?}", self.config_path))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Scraped site URLs
pub mod site {
    /// Coin listing, page 1
    pub const COINS_PAGE: &str = "https://arzdigital.com/coins/";

    /// Currency ticker widget with the tracked pairs and columns
    pub const TICKER_WIDGET: &str = "https://fxpricing.com/fx-widget/ticker-tape-widget.php?id=1,2,3,5,14,20,1972,1984&border=show&speed=50&click_target=blank&theme=light&tm-cr=FFFFFF&hr-cr=00000013&by-cr=28A745&sl-cr=DC3545&flags=circle&d_mode=compact-name&column=ask,bid,spread,chg_per&lang=en&font=Arial,%20sans-serif";
}

/// Default configuration values
pub mod defaults {
    /// Upper bound for the default worker pool size
    pub const MAX_WORKERS: usize = 10;

    /// Default number of coin listing pages
    pub const PAGE_COUNT: u32 = 10;

    pub const COIN_TABLE_TIMEOUT_SECONDS: u64 = 20;
    pub const QUOTE_TICKER_TIMEOUT_SECONDS: u64 = 10;

    /// User agent sent to the coin listing
    pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    /// User agent sent to the ticker widget
    pub const TOOL_USER_AGENT: &str = concat!("market-scraper/", env!("CARGO_PKG_VERSION"));

    /// Maximum redirects followed per request
    pub const REDIRECT_LIMIT: usize = 10;

    pub const COIN_TABLE_OUTPUT_FILE: &str = "arzdigital_data.txt";
    pub const QUOTE_TICKER_OUTPUT_FILE: &str = "quote_price.txt";

    /// Between two record blocks, never after the last
    pub const RECORD_SEPARATOR: &str = "***\n***\n***\n";

    /// Written instead of an empty file when the profile asks for it
    pub const EMPTY_RESULT_LINE: &str = "No data retrieved.";

    pub const APP_DIR_NAME: &str = "market-scraper";
    pub const CONFIG_FILE_NAME: &str = "config.json";
    pub const ENV_PREFIX: &str = "MARKET_SCRAPER";

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "market-scraper.log";
}

/// URL building helper functions
pub mod utils {
    /// Listing URLs for pages `1..=page_count`
    ///
    /// Page 1 is the base URL itself; later pages append `page-{n}/`.
    pub fn page_urls(base_url: &str, page_count: u32) -> Vec<String> {
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        (1..=page_count)
            .map(|page| {
                if page <= 1 {
                    base.clone()
                } else {
                    format!("{base}page-{page}/")
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn pagination_starts_with_base_url() {
        let urls = utils::page_urls("https://arzdigital.com/coins", 3);
        assert_eq!(
            urls,
            vec![
                "https://arzdigital.com/coins/",
                "https://arzdigital.com/coins/page-2/",
                "https://arzdigital.com/coins/page-3/",
            ]
        );
    }

    #[test]
    fn default_config_targets_ten_coin_pages() {
        let config = AppConfig::default();
        let urls = config.scrape.page_urls();
        assert_eq!(urls.len(), 10);
        assert_eq!(urls[0], site::COINS_PAGE);
        assert_eq!(urls[9], "https://arzdigital.com/coins/page-10/");
        assert_eq!(config.scrape.request_timeout(), Duration::from_secs(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn quote_profile_uses_single_widget_url_and_placeholder() {
        let mut config = AppConfig::default();
        config.scrape.profile = SiteProfile::QuoteTicker;

        assert_eq!(config.scrape.page_urls(), vec![site::TICKER_WIDGET.to_string()]);
        assert_eq!(config.scrape.request_timeout(), Duration::from_secs(10));
        assert_eq!(
            config.output.empty_placeholder(SiteProfile::QuoteTicker),
            Some(defaults::EMPTY_RESULT_LINE)
        );
        assert_eq!(config.output.empty_placeholder(SiteProfile::CoinTable), None);
    }

    #[test]
    fn worker_count_defaults_to_url_count_capped() {
        let mut scrape = ScrapeConfig::default();
        assert_eq!(scrape.worker_count(3), 3);
        assert_eq!(scrape.worker_count(25), defaults::MAX_WORKERS);
        assert_eq!(scrape.worker_count(0), 1);

        scrape.max_workers = Some(2);
        assert_eq!(scrape.worker_count(25), 2);
    }

    #[test]
    fn explicit_urls_replace_pagination() {
        let scrape = ScrapeConfig {
            urls: vec!["http://localhost/a".into(), "http://localhost/b".into()],
            ..ScrapeConfig::default()
        };
        assert_eq!(scrape.page_urls().len(), 2);
    }

    #[test]
    fn validation_rejects_zero_workers_and_bad_urls() {
        let mut config = AppConfig::default();
        config.scrape.max_workers = Some(0);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scrape.urls = vec!["not a url".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("absent.json"));
        let config = manager.load_config().unwrap();
        assert_eq!(config.scrape.page_count, defaults::PAGE_COUNT);
        assert_eq!(config.scrape.profile, SiteProfile::CoinTable);
    }

    #[test]
    fn source_description_reflects_file_presence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let manager = ConfigManager::with_path(&path);
        assert!(manager.describe_source().starts_with("Configuration file not found"));

        manager.write_default_config().unwrap();
        assert!(manager.describe_source().starts_with("Loaded configuration from"));
    }

    #[test]
    fn written_defaults_load_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("conf").join("config.json"));

        manager.write_default_config().unwrap();
        assert_eq!(manager.load_config().unwrap(), AppConfig::default());
        assert!(manager.write_default_config().is_err());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "scrape": {{ "profile": "quote_ticker", "max_workers": 4 }},
                "output": {{ "path": "out/quotes.txt" }},
                "parsing": {{ "quote_ticker": {{ "block": "div.quote" }} }}
            }}"#
        )
        .unwrap();

        let config = ConfigManager::with_path(&path).load_config().unwrap();
        assert_eq!(config.scrape.profile, SiteProfile::QuoteTicker);
        assert_eq!(config.scrape.max_workers, Some(4));
        assert!(config.scrape.follow_redirects);
        assert_eq!(
            config.output.resolved_path(config.scrape.profile),
            PathBuf::from("out/quotes.txt")
        );
        assert_eq!(config.parsing.quote_ticker.block, "div.quote");
        assert_eq!(config.parsing.quote_ticker.bottom, "div.ticker-bottom");
        assert_eq!(config.logging, LoggingConfig::default());
    }
}
