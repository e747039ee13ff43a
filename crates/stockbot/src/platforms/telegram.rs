//! Telegram bot implementation
//!
//! Long-polls the Bot API (`getUpdates`) and answers slash commands with
//! `sendMessage`. Lookups are handled one at a time in arrival order.

use crate::bot::StockBot;
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause after a failed poll before trying again
const ERROR_PAUSE: Duration = Duration::from_secs(3);

/// Extra room on top of the long-poll timeout for the HTTP request itself
const REQUEST_SLACK: Duration = Duration::from_secs(10);

/// Telegram bot configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from BotFather
    pub token: String,

    /// Bot API base URL
    pub api_base: String,

    /// Long-poll timeout for `getUpdates`
    pub poll_timeout: Duration,
}

impl TelegramConfig {
    /// Take the Telegram settings out of a [`StockConfig`]; the token is required
    pub fn from_stock_config(config: &StockConfig) -> Result<Self> {
        Ok(Self {
            token: config.require_token()?.to_string(),
            api_base: config.telegram_api_base.trim_end_matches('/').to_string(),
            poll_timeout: config.poll_timeout,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T> {
        if !self.ok {
            return Err(StockError::TelegramError(format!(
                "{method}: {}",
                self.description.unwrap_or_else(|| "request failed".to_string())
            )));
        }
        self.result
            .ok_or_else(|| StockError::TelegramError(format!("{method}: missing result")))
    }
}

/// One incoming update
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest {
    offset: i64,
    timeout: u64,
    allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

impl Update {
    /// Chat and command text for updates the bot should answer
    pub fn command(&self) -> Option<(i64, &str)> {
        let message = self.message.as_ref()?;
        let text = message.text.as_deref()?.trim();
        text.starts_with('/').then_some((message.chat.id, text))
    }
}

/// Offset that acknowledges every update in `updates`
pub fn next_offset(current: i64, updates: &[Update]) -> i64 {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .fold(current, i64::max)
}

/// Telegram bot
pub struct TelegramBot {
    config: TelegramConfig,
    http: Client,
    bot: StockBot,
    offset: i64,
}

impl TelegramBot {
    /// Create a new Telegram bot
    pub fn new(config: TelegramConfig, bot: StockBot) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.poll_timeout + REQUEST_SLACK)
            .build()?;

        Ok(Self {
            config,
            http,
            bot,
            offset: 0,
        })
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        // reqwest errors carry the URL, which contains the token
        let response = self
            .http
            .post(self.config.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        envelope.into_result(method)
    }

    async fn get_updates(&self) -> Result<Vec<Update>> {
        let request = GetUpdatesRequest {
            offset: self.offset,
            timeout: self.config.poll_timeout.as_secs(),
            allowed_updates: &["message"],
        };
        self.call("getUpdates", &request).await
    }

    /// Send a text message to a chat
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let request = SendMessageRequest { chat_id, text };
        let _: serde_json::Value = self.call("sendMessage", &request).await?;
        Ok(())
    }

    async fn handle_update(&self, update: &Update) {
        let Some((chat_id, text)) = update.command() else {
            debug!(update_id = update.update_id, "ignoring non-command update");
            return;
        };

        let reply = self.bot.process_input(text).await;
        if let Err(err) = self.send_message(chat_id, &reply).await {
            warn!(chat_id, error = %err, "failed to send reply");
        }
    }

    /// Fetch one batch of updates and answer them
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self.get_updates().await?;
        for update in &updates {
            self.handle_update(update).await;
        }
        self.offset = next_offset(self.offset, &updates);
        Ok(updates.len())
    }

    /// Poll until Ctrl+C
    pub async fn run(&mut self) -> Result<()> {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "cannot listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Poll until `shutdown` completes, including while pausing after an error
    pub async fn run_until(&mut self, shutdown: impl Future<Output = ()>) -> Result<()> {
        info!("Bot running... Ctrl+C to stop.");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                polled = self.poll_once() => match polled {
                    Ok(count) if count > 0 => debug!(count, "handled updates"),
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "polling failed");
                        tokio::select! {
                            () = &mut shutdown => break,
                            () = tokio::time::sleep(ERROR_PAUSE) => {}
                        }
                    }
                }
            }
        }

        info!("Shutting down");
        Ok(())
    }
}
