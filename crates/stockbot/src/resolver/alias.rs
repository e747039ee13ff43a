//! Company-name aliases

use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in company name → ticker pairs. Keys are lowercase.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("apple", "AAPL"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("microsoft", "MSFT"),
    ("tesla", "TSLA"),
    ("amazon", "AMZN"),
    ("nvidia", "NVDA"),
    ("meta", "META"),
    ("facebook", "META"),
    ("netflix", "NFLX"),
];

static DEFAULT_TABLE: LazyLock<AliasTable> =
    LazyLock::new(|| AliasTable::from_pairs(DEFAULT_ALIASES.iter().copied()));

/// Immutable many-to-one mapping from company name to ticker
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Build a table; names are lowercased on the way in
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(name, symbol)| (name.to_lowercase(), symbol.to_string()))
            .collect();
        Self { entries }
    }

    /// Process-wide table built from [`DEFAULT_ALIASES`]
    pub fn builtin() -> &'static Self {
        &DEFAULT_TABLE
    }

    /// Case-insensitive exact lookup
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
