//! HTTP client for listing pages
//!
//! One GET per page, no retries: a failed page is reported to the caller and
//! simply contributes no records.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};
use tracing::{debug, error, info};

use crate::infrastructure::config::{ScrapeConfig, defaults};
use crate::infrastructure::fetch_error::{FetchError, FetchResult};

/// Configuration for HTTP client behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Whether to follow redirects
    pub follow_redirects: bool,
}

impl HttpClientConfig {
    /// Client settings resolved for the configured site profile
    pub fn from_scrape_config(scrape: &ScrapeConfig) -> Self {
        Self {
            timeout: scrape.request_timeout(),
            user_agent: scrape.user_agent().to_string(),
            follow_redirects: scrape.follow_redirects,
        }
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self::from_scrape_config(&ScrapeConfig::default())
    }
}

/// Shared HTTP client; clones reuse the same connection pool
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> FetchResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(defaults::REDIRECT_LIMIT)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .map_err(|e| FetchError::ClientSetup {
                reason: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    pub const fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Send a GET and require a success status
    pub async fn fetch_response(&self, url: &str) -> FetchResult<Response> {
        info!("HTTP GET: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            error!("HTTP error {}: {}", status, url);
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Fetch a page body as text, rejecting empty bodies
    pub async fn fetch_html_string(&self, url: &str) -> FetchResult<String> {
        let response = self.fetch_response(url).await?;

        let html_content = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, &e))?;

        if html_content.trim().is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        debug!("Fetched {} bytes from {}", html_content.len(), url);
        Ok(html_content)
    }
}
