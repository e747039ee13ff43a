//! Configuration for stock lookups and bot transports

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the Telegram bot token
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";

const DEFAULT_CHART_BASE: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration shared by the lookup pipeline and the bot platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Maximum number of search candidates considered when resolving free text
    pub search_limit: usize,

    /// Number of trailing daily bars requested per lookup
    pub history_days: u32,

    /// Base URL of the Yahoo chart endpoint used for quote snapshots
    pub yahoo_chart_base: String,

    /// User agent sent with snapshot requests
    pub user_agent: String,

    /// Telegram bot token (optional until the Telegram platform starts)
    pub telegram_token: Option<String>,

    /// Base URL of the Telegram Bot API
    pub telegram_api_base: String,

    /// Long-poll timeout passed to `getUpdates`
    pub poll_timeout: Duration,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            search_limit: 10,
            history_days: 5,
            yahoo_chart_base: DEFAULT_CHART_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            telegram_token: None,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            poll_timeout: Duration::from_secs(30),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Load the Telegram token from the environment
    pub fn with_env_token(mut self) -> Self {
        if let Some(token) = read_env_token() {
            self.telegram_token = Some(token);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.search_limit == 0 {
            return Err(StockError::ConfigError(
                "search_limit must be greater than 0".to_string(),
            ));
        }

        if self.history_days == 0 {
            return Err(StockError::ConfigError(
                "history_days must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Telegram token, or a configuration error naming the variable to set
    pub fn require_token(&self) -> Result<&str> {
        self.telegram_token
            .as_deref()
            .ok_or_else(|| StockError::ConfigError(format!("Missing {TOKEN_ENV_VAR}")))
    }
}

fn read_env_token() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR).ok().and_then(normalize_token)
}

fn normalize_token(raw: String) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    search_limit: Option<usize>,
    history_days: Option<u32>,
    yahoo_chart_base: Option<String>,
    user_agent: Option<String>,
    telegram_token: Option<String>,
    telegram_api_base: Option<String>,
    poll_timeout: Option<Duration>,
}

impl StockConfigBuilder {
    /// Set the search candidate cap
    pub fn search_limit(mut self, limit: usize) -> Self {
        self.search_limit = Some(limit);
        self
    }

    /// Set the number of daily bars requested
    pub fn history_days(mut self, days: u32) -> Self {
        self.history_days = Some(days);
        self
    }

    /// Set the Yahoo chart endpoint base URL
    pub fn yahoo_chart_base(mut self, base: impl Into<String>) -> Self {
        self.yahoo_chart_base = Some(base.into());
        self
    }

    /// Set the user agent for snapshot requests
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the Telegram token; blank tokens are ignored
    pub fn telegram_token(mut self, token: impl Into<String>) -> Self {
        self.telegram_token = normalize_token(token.into());
        self
    }

    /// Set the Telegram Bot API base URL
    pub fn telegram_api_base(mut self, base: impl Into<String>) -> Self {
        self.telegram_api_base = Some(base.into());
        self
    }

    /// Set the long-poll timeout
    pub fn poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = Some(timeout);
        self
    }

    /// Load the Telegram token from the environment
    pub fn with_env_token(mut self) -> Self {
        if let Some(token) = read_env_token() {
            self.telegram_token = Some(token);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            search_limit: self.search_limit.unwrap_or(defaults.search_limit),
            history_days: self.history_days.unwrap_or(defaults.history_days),
            yahoo_chart_base: self.yahoo_chart_base.unwrap_or(defaults.yahoo_chart_base),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            telegram_token: self.telegram_token,
            telegram_api_base: self.telegram_api_base.unwrap_or(defaults.telegram_api_base),
            poll_timeout: self.poll_timeout.unwrap_or(defaults.poll_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
