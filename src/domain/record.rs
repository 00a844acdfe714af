//! Market records extracted from listing rows.
//!
//! Every field is kept as `Option<String>` while the record moves through the
//! pipeline. The `N/A` placeholder is applied only when a record is rendered
//! for output, through [`Record::rendered_fields`].

use std::fmt;

/// Placeholder written for a field whose markup was absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// A row of named string fields with a fixed declared order.
pub trait Record: Send + Sync + fmt::Debug + 'static {
    /// Output keys, in the order they are written.
    const FIELD_NAMES: &'static [&'static str];

    /// Field values aligned index-by-index with [`Self::FIELD_NAMES`].
    fn values(&self) -> Vec<Option<&str>>;

    /// `(key, value)` pairs with missing values replaced by [`NOT_AVAILABLE`].
    fn rendered_fields(&self) -> Vec<(&'static str, &str)> {
        Self::FIELD_NAMES
            .iter()
            .copied()
            .zip(self.values().into_iter().map(|v| v.unwrap_or(NOT_AVAILABLE)))
            .collect()
    }
}

/// One row of the coin listing table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinRecord {
    pub rank: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub price_usd: Option<String>,
    pub price_toman: Option<String>,
    pub total_market_usd: Option<String>,
    pub total_market_toman: Option<String>,
    pub daily_market_usd: Option<String>,
    pub daily_market_toman: Option<String>,
    pub daily_change: Option<String>,
    pub weekly_change: Option<String>,
    pub logo: Option<String>,
}

impl Record for CoinRecord {
    const FIELD_NAMES: &'static [&'static str] = &[
        "Rank",
        "Name",
        "Slug",
        "Price_USD",
        "Price_Toman",
        "Total_Market_USD",
        "Total_Market_Toman",
        "Daily_Market_USD",
        "Daily_Market_Toman",
        "Daily_Positive_Negative",
        "Weekly_Positive_Negative",
        "Logo",
    ];

    fn values(&self) -> Vec<Option<&str>> {
        vec![
            self.rank.as_deref(),
            self.name.as_deref(),
            self.slug.as_deref(),
            self.price_usd.as_deref(),
            self.price_toman.as_deref(),
            self.total_market_usd.as_deref(),
            self.total_market_toman.as_deref(),
            self.daily_market_usd.as_deref(),
            self.daily_market_toman.as_deref(),
            self.daily_change.as_deref(),
            self.weekly_change.as_deref(),
            self.logo.as_deref(),
        ]
    }
}

/// One block of the currency ticker widget. Carries the reduced field set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRecord {
    pub rank: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub price_usd: Option<String>,
    pub daily_change: Option<String>,
    pub logo: Option<String>,
}

impl Record for QuoteRecord {
    const FIELD_NAMES: &'static [&'static str] = &[
        "Rank",
        "Name",
        "Slug",
        "Price_USD",
        "Daily_Positive_Negative",
        "Logo",
    ];

    fn values(&self) -> Vec<Option<&str>> {
        vec![
            self.rank.as_deref(),
            self.name.as_deref(),
            self.slug.as_deref(),
            self.price_usd.as_deref(),
            self.daily_change.as_deref(),
            self.logo.as_deref(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_fields_follow_declared_order() {
        let record = CoinRecord {
            rank: Some("1".into()),
            name: Some("Bitcoin".into()),
            slug: Some("BTC".into()),
            ..Default::default()
        };

        let keys: Vec<&str> = record.rendered_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, CoinRecord::FIELD_NAMES);
        assert_eq!(keys.len(), 12);
        assert_eq!(keys.first(), Some(&"Rank"));
        assert_eq!(keys.last(), Some(&"Logo"));
    }

    #[test]
    fn missing_values_render_as_placeholder_not_empty() {
        let record = CoinRecord {
            name: Some("Ether".into()),
            price_usd: Some(String::new()),
            ..Default::default()
        };

        let fields = record.rendered_fields();
        assert_eq!(fields[0], ("Rank", NOT_AVAILABLE));
        assert_eq!(fields[1], ("Name", "Ether"));
        // present-but-empty text stays empty; only absence becomes the placeholder
        assert_eq!(fields[3], ("Price_USD", ""));
        assert_eq!(fields[11], ("Logo", NOT_AVAILABLE));
    }

    #[test]
    fn quote_record_has_reduced_field_set() {
        let record = QuoteRecord {
            rank: Some("3".into()),
            name: Some("EUR/USD".into()),
            slug: Some("EUR/USD".into()),
            price_usd: Some("$1.0850".into()),
            daily_change: Some("0.12%".into()),
            logo: None,
        };

        let fields = record.rendered_fields();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[3], ("Price_USD", "$1.0850"));
        assert_eq!(fields[5], ("Logo", NOT_AVAILABLE));
    }
}
