//! Query → summary pipeline

use super::format::Summary;
use super::metrics::{DerivedMetrics, ReconciledQuote};
use crate::error::{Result, StockError};
use crate::quote::{QuoteSnapshot, QuoteSource};
use crate::resolver::SymbolResolver;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default number of trailing daily bars requested
pub const DEFAULT_HISTORY_DAYS: u32 = 5;

/// Resolves a query and turns the quote data for it into a [`Summary`]
pub struct SummaryBuilder {
    resolver: SymbolResolver,
    quotes: Arc<dyn QuoteSource>,
    history_days: u32,
}

impl SummaryBuilder {
    pub fn new(resolver: SymbolResolver, quotes: Arc<dyn QuoteSource>) -> Self {
        Self {
            resolver,
            quotes,
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }

    /// Number of daily bars requested per lookup
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days;
        self
    }

    pub fn resolver(&self) -> &SymbolResolver {
        &self.resolver
    }

    /// Rendered summary text for `query`.
    ///
    /// Fails with [`StockError::NoHistory`] when the source has no daily bars
    /// for the resolved symbol.
    pub async fn build_summary(&self, query: &str) -> Result<String> {
        Ok(self.build(query).await?.render())
    }

    /// Structured summary for `query`
    pub async fn build(&self, query: &str) -> Result<Summary> {
        let query = query.trim();
        let symbol = self.resolver.resolve(query).await;
        info!(query, symbol = %symbol, "building quote summary");

        let history = match self.quotes.history(&symbol, self.history_days).await {
            Ok(bars) => bars,
            Err(err) => {
                warn!(symbol = %symbol, error = %err, "price history unavailable");
                Vec::new()
            }
        };
        if history.is_empty() {
            return Err(StockError::NoHistory { symbol });
        }

        let snapshot = match self.quotes.snapshot(&symbol).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                debug!(symbol = %symbol, error = %err, "snapshot unavailable, using history only");
                QuoteSnapshot::default()
            }
        };

        let quote = ReconciledQuote::reconcile(&symbol, &snapshot, &history)?;
        let metrics = DerivedMetrics::from(&quote);
        debug!(
            symbol = %symbol,
            change = metrics.change,
            trend = ?metrics.trend,
            "derived metrics"
        );

        Ok(Summary::new(query, &symbol, &quote, &metrics))
    }
}
