//! Stock Market Bot
//!
//! Answers `/stock <company or symbol>` with price, previous close, change and
//! day's range.
//!
//! # Usage
//!
//! ```bash
//! # Telegram (default)
//! export TELEGRAM_BOT_TOKEN="123456:ABC..."
//! cargo run --bin stock-bot -p stockbot
//!
//! # Terminal session
//! cargo run --bin stock-bot -p stockbot -- repl
//!
//! # One-off lookup
//! cargo run --bin stock-bot -p stockbot -- query netflix
//! ```

use clap::{Parser, Subcommand};
use stockbot::platforms::{CliBot, TelegramBot, TelegramConfig};
use stockbot::{StockBot, StockConfig};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-bot")]
#[command(about = "Stock quote bot for Telegram and the terminal", long_about = None)]
struct Args {
    /// Transport to run; Telegram when omitted
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Daily bars requested per lookup
    #[arg(long, global = true)]
    history_days: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Long-poll the Telegram Bot API
    Telegram,
    /// Interactive terminal session
    Repl,
    /// Print one summary and exit
    Query {
        /// Company name or ticker
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn load_config(args: &Args) -> stockbot::Result<StockConfig> {
    let mut builder = StockConfig::builder().with_env_token();
    if let Some(days) = args.history_days {
        builder = builder.history_days(days);
    }
    builder.build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockbot_utils::init_tracing(stockbot_utils::DEFAULT_DIRECTIVE);

    let args = Args::parse();
    let config = load_config(&args)?;
    let bot = StockBot::from_config(&config)?;

    match args.mode.unwrap_or(Mode::Telegram) {
        Mode::Telegram => {
            let telegram = TelegramConfig::from_stock_config(&config)?;
            info!(api_base = %telegram.api_base, "Starting Telegram bot");
            TelegramBot::new(telegram, bot)?.run().await?;
        }
        Mode::Repl => CliBot::new(bot).run().await?,
        Mode::Query { words } => {
            let reply = bot.stock_reply(&words.join(" ")).await;
            println!("{reply}");
        }
    }

    Ok(())
}
