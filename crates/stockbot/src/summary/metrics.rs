//! Field reconciliation and derived price metrics

use crate::error::{Result, StockError};
use crate::quote::{HistoryBar, QuoteSnapshot};

/// Percentage moves smaller than this (in percent, not price units) are flat
pub const FLAT_THRESHOLD_PCT: f64 = 0.01;

/// Direction of the move since the previous close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
    Unknown,
}

impl Trend {
    pub fn classify(percent_change: Option<f64>) -> Self {
        match percent_change {
            None => Self::Unknown,
            Some(pct) if pct.abs() < FLAT_THRESHOLD_PCT => Self::Flat,
            Some(pct) if pct > 0.0 => Self::Up,
            Some(_) => Self::Down,
        }
    }

    /// Marker shown in front of the change figure
    pub fn marker(self) -> &'static str {
        match self {
            Self::Up => "🔺",
            Self::Down => "🔻",
            Self::Flat => "➖",
            Self::Unknown => "❓",
        }
    }
}

/// Price fields after every fallback chain has been applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconciledQuote {
    pub current_price: f64,
    pub previous_close: f64,
    pub day_low: f64,
    pub day_high: f64,
}

impl ReconciledQuote {
    /// Merge snapshot fields with daily bars (oldest first).
    ///
    /// - current price: snapshot, else latest close
    /// - previous close: second-to-last close, else the only close
    /// - day low/high: snapshot, else latest bar
    pub fn reconcile(
        symbol: &str,
        snapshot: &QuoteSnapshot,
        history: &[HistoryBar],
    ) -> Result<Self> {
        let Some(latest) = history.last() else {
            return Err(StockError::NoHistory {
                symbol: symbol.to_string(),
            });
        };

        let previous_close = match history {
            [.., previous, _] => previous.close,
            _ => latest.close,
        };

        Ok(Self {
            current_price: snapshot.last_price.unwrap_or(latest.close),
            previous_close,
            day_low: snapshot.day_low.unwrap_or(latest.low),
            day_high: snapshot.day_high.unwrap_or(latest.high),
        })
    }
}

/// Change figures derived from current price and previous close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    /// `None` when the previous close is zero
    pub percent_change: Option<f64>,
    pub trend: Trend,
}

impl DerivedMetrics {
    pub fn compute(current_price: f64, previous_close: f64) -> Self {
        let change = current_price - previous_close;
        let percent_change = (previous_close != 0.0).then(|| change / previous_close * 100.0);

        Self {
            current_price,
            previous_close,
            change,
            percent_change,
            trend: Trend::classify(percent_change),
        }
    }
}

impl From<&ReconciledQuote> for DerivedMetrics {
    fn from(quote: &ReconciledQuote) -> Self {
        Self::compute(quote.current_price, quote.previous_close)
    }
}
