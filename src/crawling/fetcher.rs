//! Page retrieval strategies and the per-page work unit

use async_trait::async_trait;
use tracing::{debug, warn};

use super::tasks::{PageResult, PageTask, TaskState};
use crate::infrastructure::fetch_error::FetchResult;
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::parsing::{ParseContext, ParsedPage, RecordParser};

/// Source of page markup
#[async_trait]
pub trait PageFetcher: Send + Sync + 'static {
    /// Strategy name used in log lines
    fn strategy_name(&self) -> &'static str;

    /// Retrieve the markup of `url`
    async fn fetch_markup(&self, url: &str) -> FetchResult<String>;
}

#[async_trait]
impl PageFetcher for HttpClient {
    fn strategy_name(&self) -> &'static str {
        "http"
    }

    async fn fetch_markup(&self, url: &str) -> FetchResult<String> {
        self.fetch_html_string(url).await
    }
}

#[cfg(feature = "browser")]
#[async_trait]
impl PageFetcher for crate::infrastructure::browser::BrowserSession {
    fn strategy_name(&self) -> &'static str {
        "browser"
    }

    async fn fetch_markup(&self, url: &str) -> FetchResult<String> {
        self.fetch_rendered_html(url).await
    }
}

/// Fetch one page and extract its records
///
/// Never fails: a transport error degrades the page to zero records.
pub async fn collect_page<P: RecordParser>(
    fetcher: &dyn PageFetcher,
    parser: &P,
    task: &PageTask,
) -> PageResult<P::Record> {
    debug!("[page {}] task {} {}", task.page_index, task.task_id, TaskState::Running);

    let markup = match fetcher.fetch_markup(&task.url).await {
        Ok(markup) => markup,
        Err(e) => {
            warn!("[page {}] {} fetch failed: {}", task.page_index, fetcher.strategy_name(), e);
            return PageResult::failure(task.page_index, &task.url, e.to_string());
        }
    };

    let page = parse_page(parser, &markup, task);
    PageResult::success(task, page.records, page.skipped_rows)
}

// The parsed document is not Send; keep it out of the async state machine.
fn parse_page<P: RecordParser>(parser: &P, markup: &str, task: &PageTask) -> ParsedPage<P::Record> {
    let context = ParseContext::new(task.page_index, task.url.as_str());
    parser.parse_markup(markup, &context)
}
