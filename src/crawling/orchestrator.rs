//! # Page collector
//!
//! Every task is spawned up front and waits for one of `worker_count`
//! semaphore permits. Results are gathered in completion order and only
//! reordered by page index once the last task has finished.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use super::fetcher::{PageFetcher, collect_page};
use super::tasks::{PageResult, PageTask, TaskOutcome, TaskState};
use crate::infrastructure::parsing::RecordParser;

/// Final state of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub page_index: u32,
    pub url: String,
    pub state: TaskState,
}

/// Everything a collection run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport<R> {
    /// Per-page outcomes, ascending page index
    pub pages: Vec<PageSummary>,
    /// Records of all pages, in page order
    pub records: Vec<R>,
}

impl<R> CollectionReport<R> {
    pub fn from_results(mut results: Vec<PageResult<R>>) -> Self {
        results.sort_by_key(|result| result.page_index);

        let pages = results
            .iter()
            .map(|result| PageSummary {
                page_index: result.page_index,
                url: result.url.clone(),
                state: TaskState::Completed(result.outcome.clone()),
            })
            .collect();

        Self {
            pages,
            records: merge_in_page_order(results),
        }
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn failed_pages(&self) -> usize {
        self.pages
            .iter()
            .filter(|page| matches!(&page.state, TaskState::Completed(outcome) if outcome.is_failure()))
            .count()
    }

    /// Rows dropped for missing structure, summed over all pages
    pub fn skipped_rows(&self) -> usize {
        self.pages
            .iter()
            .map(|page| match &page.state {
                TaskState::Completed(TaskOutcome::Success { skipped_rows, .. }) => *skipped_rows,
                _ => 0,
            })
            .sum()
    }
}

/// Sort page results by page index and concatenate their records
pub fn merge_in_page_order<R>(mut results: Vec<PageResult<R>>) -> Vec<R> {
    results.sort_by_key(|result| result.page_index);
    results.into_iter().flat_map(|result| result.records).collect()
}

/// Bounded scatter/gather over page tasks
pub struct PageCollector<P: RecordParser> {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<P>,
    worker_count: usize,
}

impl<P: RecordParser> PageCollector<P> {
    pub fn new(fetcher: Arc<dyn PageFetcher>, parser: Arc<P>, worker_count: usize) -> Self {
        Self {
            fetcher,
            parser,
            worker_count: worker_count.max(1),
        }
    }

    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Run every task and gather the results
    ///
    /// A task that fails or panics yields zero records for its page; the
    /// other pages are unaffected.
    pub async fn collect(&self, tasks: Vec<PageTask>) -> CollectionReport<P::Record> {
        let task_count = tasks.len();
        info!(
            "Collecting {} pages with {} workers ({} strategy, {} layout)",
            task_count,
            self.worker_count,
            self.fetcher.strategy_name(),
            self.parser.layout_name()
        );

        let semaphore = Arc::new(Semaphore::new(self.worker_count));
        let mut in_flight = FuturesUnordered::new();

        for task in tasks {
            debug!("[page {}] task {} {}", task.page_index, task.task_id, TaskState::Pending);
            let page_index = task.page_index;
            let url = task.url.clone();

            let semaphore = Arc::clone(&semaphore);
            let fetcher = Arc::clone(&self.fetcher);
            let parser = Arc::clone(&self.parser);

            let handle = tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return PageResult::failure(task.page_index, task.url, "worker pool closed");
                };
                collect_page(fetcher.as_ref(), parser.as_ref(), &task).await
            });

            in_flight.push(handle.map(move |joined| (page_index, url, joined)));
        }

        let mut results = Vec::with_capacity(task_count);
        while let Some((page_index, url, joined)) = in_flight.next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    error!("[page {}] worker task aborted: {}", page_index, e);
                    PageResult::failure(page_index, url, format!("worker task aborted: {e}"))
                }
            };
            debug!(
                "[page {}] {} ({}/{} done)",
                result.page_index,
                TaskState::Completed(result.outcome.clone()),
                results.len() + 1,
                task_count
            );
            results.push(result);
        }

        CollectionReport::from_results(results)
    }
}
