//! Infrastructure layer: configuration, logging, page retrieval, HTML
//! parsing and output files.

pub mod config; // Configuration sections, defaults and site URLs
pub mod fetch_error;
pub mod http_client;
pub mod logging;
pub mod parsing; // Per-layout record parsers
pub mod parsing_error;
pub mod record_writer;

#[cfg(feature = "browser")]
pub mod browser;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, FetchStrategy, SiteProfile, defaults, site};
pub use fetch_error::{FetchError, FetchResult};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{get_log_directory, init_logging_with_config, log_system_info};
pub use parsing::{
    CoinTableParser, ParseContext, ParsedPage, ParsingConfig, ParsingError, ParsingResult,
    QuoteTickerParser, RecordParser,
};
pub use record_writer::{OutputError, render_records, write_records};

#[cfg(feature = "browser")]
pub use browser::BrowserSession;
