//! # Page task definitions
//!
//! A task is one listing URL with its 1-based page index. Its result is
//! self-contained and only merged by the collector once every task is done.

use std::fmt;

use uuid::Uuid;

/// Unique identifier for page tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new unique task ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fetch-and-parse work for one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTask {
    pub task_id: TaskId,
    /// 1-based position of the URL in the configured list
    pub page_index: u32,
    pub url: String,
}

impl PageTask {
    pub fn new(page_index: u32, url: impl Into<String>) -> Self {
        Self {
            task_id: TaskId::new(),
            page_index,
            url: url.into(),
        }
    }

    /// One task per URL, numbered from 1 in list order
    pub fn from_urls(urls: &[String]) -> Vec<Self> {
        (1u32..)
            .zip(urls)
            .map(|(page_index, url)| Self::new(page_index, url.as_str()))
            .collect()
    }
}

/// How a finished task ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success { record_count: usize, skipped_rows: usize },
    Failure { reason: String },
}

impl TaskOutcome {
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// Task lifecycle: `Pending -> Running -> Completed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Completed(TaskOutcome),
}

impl TaskState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed(TaskOutcome::Success { record_count, .. }) => {
                write!(f, "completed ({record_count} records)")
            }
            Self::Completed(TaskOutcome::Failure { reason }) => write!(f, "failed ({reason})"),
        }
    }
}

/// Records gathered from one page, tagged with the page index they merge by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<R> {
    pub page_index: u32,
    pub url: String,
    pub records: Vec<R>,
    pub outcome: TaskOutcome,
}

impl<R> PageResult<R> {
    pub fn success(task: &PageTask, records: Vec<R>, skipped_rows: usize) -> Self {
        let record_count = records.len();
        Self {
            page_index: task.page_index,
            url: task.url.clone(),
            records,
            outcome: TaskOutcome::Success {
                record_count,
                skipped_rows,
            },
        }
    }

    /// A page that contributes no records
    pub fn failure(page_index: u32, url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            page_index,
            url: url.into(),
            records: Vec::new(),
            outcome: TaskOutcome::Failure {
                reason: reason.into(),
            },
        }
    }
}
