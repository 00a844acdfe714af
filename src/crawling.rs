//! # Page collection
//!
//! Scatter one task per listing URL across a bounded worker pool, gather
//! results as they finish, then restore page order before anything is
//! written.

pub mod fetcher;
pub mod orchestrator;
pub mod tasks;

// Clean re-exports
pub use fetcher::{PageFetcher, collect_page};
pub use orchestrator::{CollectionReport, PageCollector, PageSummary, merge_in_page_order};
pub use tasks::{PageResult, PageTask, TaskId, TaskOutcome, TaskState};
