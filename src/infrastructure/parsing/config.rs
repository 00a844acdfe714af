//! Parsing configuration for listing extraction
//!
//! Centralized CSS selectors for both site layouts. The defaults mirror the
//! live markup; a config file can override any of them.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Coin listing table selectors
    pub coin_table: CoinTableSelectors,

    /// Currency ticker widget selectors
    pub quote_ticker: QuoteTickerSelectors,
}

/// CSS selectors for the coin listing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinTableSelectors {
    /// One element per coin
    pub row: String,
    pub rank_cell: String,
    pub name_cell: String,
    pub name_link: String,
    pub logo_image: String,
    pub price_cell: String,
    pub rial_price_cell: String,
    pub market_cap_cell: String,
    pub volume_cell: String,
    pub daily_swing_cell: String,
    pub weekly_swing_cell: String,
    /// Generic text holder inside a cell
    pub span: String,
    /// Dollar amount inside the market cap / volume cells
    pub usd_amount: String,
    /// Toman amount inside the market cap / volume cells
    pub toman_amount: String,
}

impl Default for CoinTableSelectors {
    fn default() -> Self {
        Self {
            row: "tr.arz-coin-tr".to_string(),
            rank_cell: "td.arz-coin-table__number-td".to_string(),
            name_cell: "td.arz-coin-table__name-td".to_string(),
            name_link: "a".to_string(),
            logo_image: "img.arz-coin-image".to_string(),
            price_cell: "td.arz-coin-table__price-td".to_string(),
            rial_price_cell: "td.arz-coin-table__rial-price-td".to_string(),
            market_cap_cell: "td.arz-coin-table__marketcap-td".to_string(),
            volume_cell: "td.arz-coin-table__volume-td".to_string(),
            daily_swing_cell: "td.arz-coin-table__daily-swing-td".to_string(),
            weekly_swing_cell: "td.arz-coin-table__weekly-swing-td".to_string(),
            span: "span".to_string(),
            usd_amount: "span[dir='auto']".to_string(),
            toman_amount: "span.arz-value-unit".to_string(),
        }
    }
}

/// CSS selectors for the currency ticker widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteTickerSelectors {
    /// One element per currency pair
    pub block: String,
    pub name: String,
    /// Container of the ask / bid / change spans
    pub bottom: String,
    pub value: String,
    pub flag: String,
    pub flag_image: String,
}

impl Default for QuoteTickerSelectors {
    fn default() -> Self {
        Self {
            block: "div.ticker-block".to_string(),
            name: "strong".to_string(),
            bottom: "div.ticker-bottom".to_string(),
            value: "span".to_string(),
            flag: "div.circleFlagMain".to_string(),
            flag_image: "img".to_string(),
        }
    }
}
