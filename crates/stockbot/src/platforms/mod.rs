//! Chat transports for the stock bot

pub mod cli;
pub mod telegram;

pub use cli::CliBot;
pub use telegram::{TelegramBot, TelegramConfig};
