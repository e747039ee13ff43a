//! Error types for stock lookups

use thiserror::Error;

/// Errors raised while resolving, fetching or relaying a stock snapshot
#[derive(Debug, Error)]
pub enum StockError {
    /// The quote source returned no daily bars for the symbol
    #[error("No price history returned (symbol may be invalid): {symbol}")]
    NoHistory {
        symbol: String,
    },

    /// Yahoo Finance request or payload failure
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Telegram Bot API rejected a call
    #[error("Telegram error: {0}")]
    TelegramError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed or unknown bot command; the message is shown to the user as is
    #[error("{0}")]
    CommandError(String),

    /// Terminal I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;
