//! Parsing error types for listing extraction
//!
//! Row-level failures are recoverable: the row is skipped and the rest of
//! the page is still extracted. Selector failures happen at parser
//! construction and stop the run before any request is made.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Required element '{element}' not found in {context}")]
    RequiredElementMissing { element: String, context: String },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Row {row_index} on page {page_index} has only {found} of {expected} value cells")]
    InsufficientCells {
        page_index: u32,
        row_index: usize,
        found: usize,
        expected: usize,
    },
}

impl ParsingError {
    /// Create a required element missing error with context
    pub fn required_element_missing(element: &str, context: &str) -> Self {
        Self::RequiredElementMissing {
            element: element.to_string(),
            context: context.to_string(),
        }
    }

    /// Create an invalid selector error
    pub fn invalid_selector(selector: &str, reason: impl ToString) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;
