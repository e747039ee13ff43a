//! Quote data shapes and the collaborator traits that supply them
//!
//! Two external collaborators feed the pipeline:
//!
//! - [`QuoteSource`]: a near-real-time [`QuoteSnapshot`] plus recent daily
//!   [`HistoryBar`]s for a symbol.
//! - [`SymbolSearch`]: free-text instrument search, reporting its result as
//!   an explicit [`SearchOutcome`].
//!
//! Payload quirks (alternate key spellings, numbers encoded as strings) are
//! absorbed here by [`RawSnapshot`] so downstream code only ever sees the
//! normalized shapes.

pub mod lenient;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized near-real-time fields; any of them may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub last_price: Option<f64>,
    pub day_low: Option<f64>,
    pub day_high: Option<f64>,
}

/// Snapshot fields as they appear on the wire.
///
/// Each attribute has been published under two spellings over time; both are
/// accepted and [`RawSnapshot::normalize`] picks the first usable one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnapshot {
    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub last_price: Option<f64>,
    #[serde(
        rename = "lastPrice",
        alias = "regularMarketPrice",
        default,
        deserialize_with = "lenient::deserialize"
    )]
    pub last_price_alt: Option<f64>,

    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub day_low: Option<f64>,
    #[serde(
        rename = "dayLow",
        alias = "regularMarketDayLow",
        default,
        deserialize_with = "lenient::deserialize"
    )]
    pub day_low_alt: Option<f64>,

    #[serde(default, deserialize_with = "lenient::deserialize")]
    pub day_high: Option<f64>,
    #[serde(
        rename = "dayHigh",
        alias = "regularMarketDayHigh",
        default,
        deserialize_with = "lenient::deserialize"
    )]
    pub day_high_alt: Option<f64>,
}

impl RawSnapshot {
    /// Collapse both spellings into one canonical snapshot.
    ///
    /// Zero and non-finite values count as missing.
    pub fn normalize(&self) -> QuoteSnapshot {
        QuoteSnapshot {
            last_price: first_usable(self.last_price, self.last_price_alt),
            day_low: first_usable(self.day_low, self.day_low_alt),
            day_high: first_usable(self.day_high, self.day_high_alt),
        }
    }
}

// A zero in either spelling is dropped, so an all-zero field falls through
// to the history bars instead of rendering as $0.00.
fn first_usable(primary: Option<f64>, secondary: Option<f64>) -> Option<f64> {
    primary
        .filter(|v| lenient::usable(*v))
        .or_else(|| secondary.filter(|v| lenient::usable(*v)))
}

/// One daily OHLC record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[cfg(test)]
impl HistoryBar {
    /// Bar with every price set to `close`
    pub fn flat(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
        }
    }
}

/// One instrument returned by a symbol search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub symbol: String,
    /// Instrument classification as reported by the source, e.g. "EQUITY" or "ETF"
    pub quote_type: String,
}

impl SearchCandidate {
    pub fn new(symbol: impl Into<String>, quote_type: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            quote_type: quote_type.into(),
        }
    }

    pub fn is_equity(&self) -> bool {
        self.quote_type.eq_ignore_ascii_case("EQUITY")
    }
}

/// Result of a symbol search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The search ran; the list may be empty
    Candidates(Vec<SearchCandidate>),
    /// The search could not be performed
    Unavailable,
}

/// Supplier of snapshots and daily history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Near-real-time fields for `symbol`
    async fn snapshot(&self, symbol: &str) -> Result<QuoteSnapshot>;

    /// Up to `days` daily bars, oldest first; empty for an unknown symbol
    async fn history(&self, symbol: &str, days: u32) -> Result<Vec<HistoryBar>>;
}

/// Free-text instrument search
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymbolSearch: Send + Sync {
    /// At most `limit` candidates for `query`
    async fn search(&self, query: &str, limit: usize) -> SearchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawSnapshot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_snake_case_fields() {
        let snapshot = raw(json!({
            "last_price": 101.25,
            "day_low": 99.0,
            "day_high": 102.0
        }))
        .normalize();

        assert_eq!(snapshot.last_price, Some(101.25));
        assert_eq!(snapshot.day_low, Some(99.0));
        assert_eq!(snapshot.day_high, Some(102.0));
    }

    #[test]
    fn test_camel_case_fields() {
        let snapshot = raw(json!({
            "lastPrice": "1,020.10",
            "dayLow": 1000,
            "dayHigh": "1,030"
        }))
        .normalize();

        assert_eq!(snapshot.last_price, Some(1020.1));
        assert_eq!(snapshot.day_low, Some(1000.0));
        assert_eq!(snapshot.day_high, Some(1030.0));
    }

    #[test]
    fn test_chart_meta_spelling() {
        let snapshot = raw(json!({
            "currency": "USD",
            "symbol": "AAPL",
            "regularMarketPrice": 189.5,
            "regularMarketDayLow": 187.1,
            "regularMarketDayHigh": 190.2
        }))
        .normalize();

        assert_eq!(snapshot.last_price, Some(189.5));
        assert_eq!(snapshot.day_low, Some(187.1));
        assert_eq!(snapshot.day_high, Some(190.2));
    }

    #[test]
    fn test_primary_spelling_wins() {
        let snapshot = raw(json!({ "last_price": 10.0, "lastPrice": 11.0 })).normalize();
        assert_eq!(snapshot.last_price, Some(10.0));
    }

    #[test]
    fn test_zero_primary_falls_through() {
        let snapshot = raw(json!({ "last_price": 0, "lastPrice": 11.0 })).normalize();
        assert_eq!(snapshot.last_price, Some(11.0));
    }

    #[test]
    fn test_zero_in_both_spellings_is_missing() {
        let snapshot = raw(json!({
            "last_price": 0,
            "lastPrice": "0.00",
            "day_low": 0.0,
            "regularMarketDayLow": 0,
            "dayHigh": 0
        }))
        .normalize();
        assert_eq!(snapshot, QuoteSnapshot::default());
    }

    #[test]
    fn test_missing_and_garbage_fields() {
        let snapshot = raw(json!({ "day_low": "n/a", "dayHigh": null })).normalize();
        assert_eq!(snapshot, QuoteSnapshot::default());
    }

    #[test]
    fn test_candidate_equity_check() {
        assert!(SearchCandidate::new("AAPL", "equity").is_equity());
        assert!(SearchCandidate::new("AAPL", "EQUITY").is_equity());
        assert!(!SearchCandidate::new("QQQ", "ETF").is_equity());
    }
}
