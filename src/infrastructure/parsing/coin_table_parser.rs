//! Coin listing table parser
//!
//! Every `tr` of the listing becomes one [`CoinRecord`]. The rank, name,
//! price, market cap and volume cells are structural: a row without one of
//! them is skipped. Every other lookup degrades to `None`.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use super::{
    CoinTableSelectors, ParseContext, ParsedPage, ParsingResult, RecordParser, compile_selector,
    required_element, stripped_text,
};
use crate::domain::{ChangeDirection, CoinRecord, signed_change};

/// Parser for the coin listing table
pub struct CoinTableParser {
    row: Selector,
    rank_cell: Selector,
    name_cell: Selector,
    name_link: Selector,
    logo_image: Selector,
    price_cell: Selector,
    rial_price_cell: Selector,
    market_cap_cell: Selector,
    volume_cell: Selector,
    daily_swing_cell: Selector,
    weekly_swing_cell: Selector,
    span: Selector,
    usd_amount: Selector,
    toman_amount: Selector,
}

impl CoinTableParser {
    /// Create a parser with the default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&CoinTableSelectors::default())
    }

    /// Create a parser with custom selector configuration
    pub fn with_config(selectors: &CoinTableSelectors) -> ParsingResult<Self> {
        Ok(Self {
            row: compile_selector(&selectors.row)?,
            rank_cell: compile_selector(&selectors.rank_cell)?,
            name_cell: compile_selector(&selectors.name_cell)?,
            name_link: compile_selector(&selectors.name_link)?,
            logo_image: compile_selector(&selectors.logo_image)?,
            price_cell: compile_selector(&selectors.price_cell)?,
            rial_price_cell: compile_selector(&selectors.rial_price_cell)?,
            market_cap_cell: compile_selector(&selectors.market_cap_cell)?,
            volume_cell: compile_selector(&selectors.volume_cell)?,
            daily_swing_cell: compile_selector(&selectors.daily_swing_cell)?,
            weekly_swing_cell: compile_selector(&selectors.weekly_swing_cell)?,
            span: compile_selector(&selectors.span)?,
            usd_amount: compile_selector(&selectors.usd_amount)?,
            toman_amount: compile_selector(&selectors.toman_amount)?,
        })
    }

    fn extract_row(&self, row: &ElementRef<'_>, index: usize, context: &ParseContext) -> ParsingResult<CoinRecord> {
        let location = format!("coin row {} on page {}", index, context.page_index);
        let attributes = row.value();

        let rank_cell = required_element(row, &self.rank_cell, "rank cell", &location)?;
        let name_cell = required_element(row, &self.name_cell, "name cell", &location)?;
        let price_cell = required_element(row, &self.price_cell, "price cell", &location)?;
        let market_cap_cell = required_element(row, &self.market_cap_cell, "market cap cell", &location)?;
        let volume_cell = required_element(row, &self.volume_cell, "volume cell", &location)?;

        let name = match name_cell.select(&self.name_link).next() {
            Some(link) => first_text(&link, &self.span),
            None => attributes.attr("data-name").map(str::to_string),
        };

        let logo = name_cell
            .select(&self.logo_image)
            .next()
            .and_then(|img| img.value().attr("data-src"))
            .map(str::to_string);

        // the toman price sits one span deeper than the other cells
        let price_toman = row
            .select(&self.rial_price_cell)
            .next()
            .and_then(|cell| cell.select(&self.span).next())
            .and_then(|outer| first_text(&outer, &self.span));

        Ok(CoinRecord {
            rank: first_text(&rank_cell, &self.span),
            name,
            slug: attributes.attr("data-symbol").map(str::to_string),
            price_usd: first_text(&price_cell, &self.span),
            price_toman,
            total_market_usd: first_text(&market_cap_cell, &self.usd_amount),
            total_market_toman: first_text(&market_cap_cell, &self.toman_amount),
            daily_market_usd: first_text(&volume_cell, &self.usd_amount),
            daily_market_toman: first_text(&volume_cell, &self.toman_amount),
            daily_change: self.change_text(row, &self.daily_swing_cell),
            weekly_change: self.change_text(row, &self.weekly_swing_cell),
            logo,
        })
    }

    /// Signed change text of a swing cell, `None` when the cell or its span is absent
    fn change_text(&self, row: &ElementRef<'_>, cell: &Selector) -> Option<String> {
        let span = row.select(cell).next()?.select(&self.span).next()?;
        let direction = ChangeDirection::from_classes(span.value().classes());
        Some(signed_change(&stripped_text(&span), direction))
    }
}

fn first_text(scope: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(|element| stripped_text(&element))
}

impl RecordParser for CoinTableParser {
    type Record = CoinRecord;

    fn layout_name(&self) -> &'static str {
        "coin_table"
    }

    fn parse_records(&self, html: &Html, context: &ParseContext) -> ParsedPage<CoinRecord> {
        let mut page = ParsedPage::default();

        for (index, row) in html.select(&self.row).enumerate() {
            match self.extract_row(&row, index, context) {
                Ok(record) => page.records.push(record),
                Err(e) => {
                    warn!("[page {}] Skipping row {}: {}", context.page_index, index, e);
                    page.skipped_rows += 1;
                }
            }
        }

        debug!(
            "[page {}] Extracted {} coin rows ({} skipped) from {}",
            context.page_index,
            page.records.len(),
            page.skipped_rows,
            context.source_url
        );
        page
    }
}
