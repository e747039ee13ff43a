//! Stock lookups for chat bots
//!
//! Turns free text such as `netflix`, `Alphabet` or `BRK.B` into a short quote
//! summary. It includes:
//!
//! - Symbol resolution (alias table, ticker-shape check, Yahoo search)
//! - Quote reconciliation from a live snapshot and recent daily history
//! - Change, percent change and trend with a fixed-order text rendering
//! - Telegram long polling and a terminal REPL as transports
//!
//! # Architecture
//!
//! [`SummaryBuilder`] drives one lookup: it asks the [`SymbolResolver`] for a
//! ticker, then pulls history and a snapshot from a [`quote::QuoteSource`].
//! Search and quotes sit behind traits so tests can swap in mocks;
//! [`YahooFinanceClient`] implements both for production.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockbot::{StockConfig, YahooFinanceClient, SummaryBuilder, SymbolResolver};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let yahoo = Arc::new(YahooFinanceClient::from_config(&StockConfig::default())?);
//!     let builder = SummaryBuilder::new(SymbolResolver::new(yahoo.clone()), yahoo);
//!
//!     println!("{}", builder.build_summary("netflix").await?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod platforms;
pub mod quote;
pub mod resolver;
pub mod summary;

// Re-export main types for convenience
pub use api::YahooFinanceClient;
pub use bot::{Command, StockBot};
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use quote::{HistoryBar, QuoteSnapshot, SearchCandidate, SearchOutcome};
pub use resolver::{AliasTable, SymbolResolver};
pub use summary::{Summary, SummaryBuilder, Trend};
