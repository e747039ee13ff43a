//! Free-text query → ticker symbol resolution
//!
//! Strategies are tried in order, each only if the previous one did not
//! apply:
//!
//! 1. empty input passes through untouched
//! 2. exact, case-insensitive [`AliasTable`] hit
//! 3. input that already looks like a ticker is returned as is
//! 4. external [`SymbolSearch`], preferring equities
//! 5. the input upper-cased
//!
//! Resolution never fails. Search problems surface as
//! [`SearchOutcome::Unavailable`] and simply fall through to step 5.

pub mod alias;

pub use alias::{AliasTable, DEFAULT_ALIASES};

use crate::quote::{SearchCandidate, SearchOutcome, SymbolSearch};
use std::sync::Arc;
use tracing::{debug, warn};

/// Longest input accepted as a literal ticker
pub const MAX_TICKER_LEN: usize = 10;

/// Default number of search candidates considered
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// True when `query` is already shaped like a ticker: upper case, at most
/// [`MAX_TICKER_LEN`] characters, only alphanumerics, `.` and `-`.
pub fn looks_like_ticker(query: &str) -> bool {
    query == query.to_uppercase()
        && query.chars().count() <= MAX_TICKER_LEN
        && query
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
}

/// First equity candidate, else the first candidate
pub fn pick_candidate(candidates: &[SearchCandidate]) -> Option<&SearchCandidate> {
    candidates
        .iter()
        .find(|c| c.is_equity())
        .or_else(|| candidates.first())
}

/// Resolves user queries to ticker symbols
pub struct SymbolResolver {
    aliases: AliasTable,
    search: Arc<dyn SymbolSearch>,
    search_limit: usize,
}

impl SymbolResolver {
    /// Resolver with the built-in alias table
    pub fn new(search: Arc<dyn SymbolSearch>) -> Self {
        Self {
            aliases: AliasTable::default(),
            search,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Replace the alias table
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Cap the number of search candidates considered
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Resolve `query` to a symbol. Only the empty query yields an empty string.
    pub async fn resolve(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return String::new();
        }

        if let Some(symbol) = self.aliases.lookup(query) {
            debug!(query, symbol, "resolved via alias table");
            return symbol.to_string();
        }

        if looks_like_ticker(query) {
            debug!(query, "query already looks like a ticker");
            return query.to_string();
        }

        if let Some(symbol) = self.search_symbol(query).await {
            debug!(query, symbol = %symbol, "resolved via search");
            return symbol;
        }

        let fallback = query.to_uppercase();
        debug!(query, symbol = %fallback, "falling back to upper-cased query");
        fallback
    }

    async fn search_symbol(&self, query: &str) -> Option<String> {
        match self.search.search(query, self.search_limit).await {
            SearchOutcome::Candidates(candidates) => {
                let considered = &candidates[..candidates.len().min(self.search_limit)];
                pick_candidate(considered)
                    .map(|c| c.symbol.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            }
            SearchOutcome::Unavailable => {
                warn!(query, "symbol search unavailable");
                None
            }
        }
    }
}
