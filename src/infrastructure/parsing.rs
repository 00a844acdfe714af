//! HTML parsing infrastructure for market listings
//!
//! Trait-based extraction: each site layout has a parser that turns a parsed
//! document into records, skipping rows that lack required structure.

pub mod coin_table_parser;
pub mod config;
pub mod context;
pub mod error;
pub mod quote_ticker_parser;

// Re-export public types
pub use coin_table_parser::CoinTableParser;
pub use config::{CoinTableSelectors, ParsingConfig, QuoteTickerSelectors};
pub use context::ParseContext;
pub use error::{ParsingError, ParsingResult};
pub use quote_ticker_parser::QuoteTickerParser;

use scraper::{ElementRef, Html, Selector};

use crate::domain::Record;

/// Rows extracted from one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage<R> {
    pub records: Vec<R>,
    /// Rows dropped because a required element was missing
    pub skipped_rows: usize,
}

impl<R> Default for ParsedPage<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped_rows: 0,
        }
    }
}

/// Parser turning a listing document into records
pub trait RecordParser: Send + Sync + 'static {
    type Record: Record;

    /// Layout name used in log lines
    fn layout_name(&self) -> &'static str;

    /// Extract every row of the document. Never fails as a whole; bad rows
    /// are counted in [`ParsedPage::skipped_rows`].
    fn parse_records(&self, html: &Html, context: &ParseContext) -> ParsedPage<Self::Record>;

    /// Parse raw markup and extract records from it
    fn parse_markup(&self, markup: &str, context: &ParseContext) -> ParsedPage<Self::Record> {
        let html = Html::parse_document(markup);
        self.parse_records(&html, context)
    }
}

/// Compile a CSS selector, mapping the error into [`ParsingError`]
pub(crate) fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))
}

/// Text nodes trimmed one by one and concatenated, empty fragments dropped
pub(crate) fn stripped_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Whole element text with surrounding whitespace removed
pub(crate) fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First descendant matching `selector`, or a row-level error naming it
pub(crate) fn required_element<'a>(
    scope: &ElementRef<'a>,
    selector: &Selector,
    element: &str,
    context: &str,
) -> ParsingResult<ElementRef<'a>> {
    scope
        .select(selector)
        .next()
        .ok_or_else(|| ParsingError::required_element_missing(element, context))
}
