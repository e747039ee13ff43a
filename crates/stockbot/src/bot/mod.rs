//! Stock Market Bot
//!
//! Transport-independent command handling. Platforms hand raw message text
//! to [`StockBot::process_input`] and relay whatever string comes back; every
//! failure is already turned into a user-facing reply at this point.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockbot::bot::StockBot;
//! use stockbot::StockConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bot = StockBot::from_config(&StockConfig::default())?;
//!     println!("{}", bot.process_input("/stock netflix").await);
//!     Ok(())
//! }
//! ```

pub mod commands;

use crate::api::YahooFinanceClient;
use crate::config::StockConfig;
use crate::error::Result;
use crate::resolver::SymbolResolver;
use crate::summary::SummaryBuilder;
use std::sync::Arc;
use tracing::{info, warn};

pub use commands::{Command, STOCK_USAGE};

/// Reply sent when an interactive session ends
pub const GOODBYE: &str = "Goodbye!";

/// Stock Market Bot
pub struct StockBot {
    summaries: SummaryBuilder,
}

impl StockBot {
    pub fn new(summaries: SummaryBuilder) -> Self {
        Self { summaries }
    }

    /// Bot backed by Yahoo Finance for both search and quotes
    pub fn from_config(config: &StockConfig) -> Result<Self> {
        config.validate()?;

        let yahoo = Arc::new(YahooFinanceClient::from_config(config)?);
        let resolver = SymbolResolver::new(yahoo.clone()).with_search_limit(config.search_limit);
        let summaries = SummaryBuilder::new(resolver, yahoo).with_history_days(config.history_days);

        Ok(Self::new(summaries))
    }

    /// Parse and execute user input, always producing a reply
    pub async fn process_input(&self, input: &str) -> String {
        match Command::parse(input) {
            Ok(command) => self.execute_command(command).await,
            Err(err) => err.to_string(),
        }
    }

    /// Execute a parsed command
    pub async fn execute_command(&self, command: Command) -> String {
        match command {
            Command::Start => Command::welcome_text().to_string(),
            Command::Help => Command::help_text().to_string(),
            Command::Exit => GOODBYE.to_string(),
            Command::Stock { query } | Command::Query { text: query } => {
                self.stock_reply(&query).await
            }
        }
    }

    /// Summary text for `query`, or an error line naming what went wrong
    pub async fn stock_reply(&self, query: &str) -> String {
        info!(query, "stock lookup");
        match self.summaries.build_summary(query).await {
            Ok(text) => text,
            Err(err) => {
                warn!(query, error = %err, "stock lookup failed");
                format!("Error fetching stock data: {err}")
            }
        }
    }
}
