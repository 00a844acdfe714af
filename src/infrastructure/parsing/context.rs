//! Parsing context for listing extraction

/// Context information for parsing one fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// 1-based page index the markup came from
    pub page_index: u32,

    /// URL the markup was fetched from, for log lines
    pub source_url: String,
}

impl ParseContext {
    /// Create new parse context
    pub fn new(page_index: u32, source_url: impl Into<String>) -> Self {
        Self {
            page_index,
            source_url: source_url.into(),
        }
    }
}
