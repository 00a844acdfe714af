//! Headless Chrome page loading
//!
//! headless_chrome is blocking, so each load runs on the blocking pool. One
//! browser process is shared by all workers; every page gets its own tab.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};
use tracing::{debug, info};

use crate::infrastructure::fetch_error::{FetchError, FetchResult};

/// Launched browser shared between page loads
#[derive(Clone)]
pub struct BrowserSession {
    browser: Arc<Browser>,
    /// Element to wait for before reading the DOM
    ready_selector: Option<String>,
    timeout: Duration,
}

impl BrowserSession {
    /// Launch Chrome. `CHROME_PATH` overrides the binary; the sandbox is
    /// disabled inside containers.
    pub fn launch(ready_selector: Option<String>, timeout: Duration) -> FetchResult<Self> {
        let in_container = std::path::Path::new("/.dockerenv").exists();
        let chrome_path = std::env::var("CHROME_PATH").ok().map(PathBuf::from);

        let options = LaunchOptions::default_builder()
            .sandbox(!in_container)
            .path(chrome_path)
            .idle_browser_timeout(timeout.max(Duration::from_secs(30)))
            .build()
            .map_err(|e| FetchError::browser("chrome://launch", e))?;

        let browser = Browser::new(options).map_err(|e| FetchError::browser("chrome://launch", e))?;
        info!("Headless Chrome launched (sandbox: {})", !in_container);

        Ok(Self {
            browser: Arc::new(browser),
            ready_selector,
            timeout,
        })
    }

    /// Load `url` in a fresh tab and return the rendered DOM
    pub async fn fetch_rendered_html(&self, url: &str) -> FetchResult<String> {
        let session = self.clone();
        let target = url.to_string();

        tokio::task::spawn_blocking(move || session.load_blocking(&target))
            .await
            .map_err(|e| FetchError::browser(url, e))?
    }

    fn load_blocking(&self, url: &str) -> FetchResult<String> {
        let tab = self.browser.new_tab().map_err(|e| FetchError::browser(url, e))?;
        tab.set_default_timeout(self.timeout);

        let content = close_after(
            || {
                tab.navigate_to(url)
                    .map_err(|e| FetchError::browser(url, e))?
                    .wait_until_navigated()
                    .map_err(|e| FetchError::browser(url, e))?;

                if let Some(selector) = &self.ready_selector {
                    // A listing without rows is still a valid (empty) page
                    if let Err(e) = tab.wait_for_element(selector) {
                        debug!("{} never appeared on {}: {}", selector, url, e);
                    }
                }

                tab.get_content().map_err(|e| FetchError::browser(url, e))
            },
            || tab.close(true),
            url,
        )?;

        if content.trim().is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }
        Ok(content)
    }
}

/// Run `body`, then `close` whatever the outcome
fn close_after<T, E: std::fmt::Display>(
    body: impl FnOnce() -> FetchResult<T>,
    close: impl FnOnce() -> Result<bool, E>,
    url: &str,
) -> FetchResult<T> {
    let result = body();
    if let Err(e) = close() {
        debug!("Failed to close tab for {}: {}", url, e);
    }
    result
}
