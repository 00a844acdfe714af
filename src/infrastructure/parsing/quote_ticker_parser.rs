//! Currency ticker widget parser
//!
//! Ranks count every ticker block on the page, so a skipped block still
//! consumes its rank.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::{
    ParseContext, ParsedPage, ParsingError, ParsingResult, QuoteTickerSelectors, RecordParser,
    compile_selector, required_element, trimmed_text,
};
use crate::domain::QuoteRecord;

/// Value spans needed in the bottom row: ask, bid, change
const REQUIRED_VALUE_SPANS: usize = 3;

/// Parser for the currency ticker widget
pub struct QuoteTickerParser {
    block: Selector,
    name: Selector,
    bottom: Selector,
    value: Selector,
    flag: Selector,
    flag_image: Selector,
}

impl QuoteTickerParser {
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&QuoteTickerSelectors::default())
    }

    pub fn with_config(selectors: &QuoteTickerSelectors) -> ParsingResult<Self> {
        Ok(Self {
            block: compile_selector(&selectors.block)?,
            name: compile_selector(&selectors.name)?,
            bottom: compile_selector(&selectors.bottom)?,
            value: compile_selector(&selectors.value)?,
            flag: compile_selector(&selectors.flag)?,
            flag_image: compile_selector(&selectors.flag_image)?,
        })
    }

    fn extract_block(
        &self,
        block: &ElementRef<'_>,
        index: usize,
        context: &ParseContext,
    ) -> ParsingResult<QuoteRecord> {
        let rank = index + 1;
        let location = format!("ticker block {} on page {}", rank, context.page_index);

        let name = block.select(&self.name).next().map(|e| trimmed_text(&e));
        let bottom = required_element(block, &self.bottom, "ticker bottom", &location)?;

        let values: Vec<ElementRef<'_>> = bottom.select(&self.value).collect();
        if values.len() < REQUIRED_VALUE_SPANS {
            return Err(ParsingError::InsufficientCells {
                page_index: context.page_index,
                row_index: index,
                found: values.len(),
                expected: REQUIRED_VALUE_SPANS,
            });
        }

        let logo = block
            .select(&self.flag)
            .next()
            .and_then(|flag| flag.select(&self.flag_image).next())
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);

        Ok(QuoteRecord {
            rank: Some(rank.to_string()),
            slug: name.clone(),
            name,
            price_usd: Some(format!("${}", trimmed_text(&values[0]))),
            daily_change: Some(trimmed_text(&values[2])),
            logo,
        })
    }
}

impl RecordParser for QuoteTickerParser {
    type Record = QuoteRecord;

    fn layout_name(&self) -> &'static str {
        "quote_ticker"
    }

    fn parse_records(&self, html: &Html, context: &ParseContext) -> ParsedPage<QuoteRecord> {
        let mut page = ParsedPage::default();

        for (index, block) in html.select(&self.block).enumerate() {
            match self.extract_block(&block, index, context) {
                Ok(record) => page.records.push(record),
                Err(e) => {
                    warn!("[page {}] Skipping ticker block {}: {}", context.page_index, index, e);
                    page.skipped_rows += 1;
                }
            }
        }

        debug!(
            "[page {}] Extracted {} quotes ({} skipped) from {}",
            context.page_index,
            page.records.len(),
            page.skipped_rows,
            context.source_url
        );
        page
    }
}
