//! Command parsing for the stock bot

use crate::error::{Result, StockError};

/// Usage line shown when `/stock` arrives without arguments
pub const STOCK_USAGE: &str = "Usage: /stock <company or symbol> (e.g., /stock netflix)";

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Greeting with usage examples
    Start,
    /// Quote snapshot for a company name or ticker
    Stock { query: String },
    /// Show help
    Help,
    /// Leave an interactive session
    Exit,
    /// Plain text without a leading `/`
    Query { text: String },
}

impl Command {
    /// Parse a command from user input.
    ///
    /// Chat platforms may address commands to a bot (`/stock@MyBot apple`);
    /// the `@` suffix is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(StockError::CommandError("Empty input".to_string()));
        }

        let Some(body) = input.strip_prefix('/') else {
            return Ok(Command::Query {
                text: input.to_string(),
            });
        };

        let mut parts = body.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(StockError::CommandError("Empty command".to_string()));
        };
        let cmd = head.split('@').next().unwrap_or(head).to_lowercase();
        let args: Vec<&str> = parts.collect();

        match cmd.as_str() {
            "start" => Ok(Command::Start),
            "stock" | "s" | "quote" => {
                if args.is_empty() {
                    return Err(StockError::CommandError(STOCK_USAGE.to_string()));
                }
                Ok(Command::Stock {
                    query: args.join(" "),
                })
            }
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(StockError::CommandError(format!(
                "Unknown command: /{cmd}. Send /help for the list of commands."
            ))),
        }
    }

    /// Greeting sent for `/start`
    pub fn welcome_text() -> &'static str {
        "Welcome to the Stock Market Bot!\n\
         Use: /stock <company or symbol>\n\
         Examples: /stock netflix   or   /stock NFLX"
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
Stock Market Bot Commands
=========================

  /stock <company or symbol>   Price, previous close, change and day's range
  /start                       Welcome message
  /help                        Show this help
  /exit                        Leave the terminal session

Aliases:
  /s = /stock    /quote = /stock    /h = /help    /q = /exit

Examples:
  /stock netflix
  /stock NFLX
  /stock alphabet
"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stock() {
        let cmd = Command::parse("/stock netflix").unwrap();
        assert_eq!(
            cmd,
            Command::Stock {
                query: "netflix".to_string()
            }
        );
    }

    #[test]
    fn test_parse_stock_joins_words() {
        let cmd = Command::parse("/stock   bank  of america ").unwrap();
        assert_eq!(
            cmd,
            Command::Stock {
                query: "bank of america".to_string()
            }
        );
    }

    #[test]
    fn test_parse_keeps_query_case() {
        let cmd = Command::parse("/s Alphabet").unwrap();
        assert_eq!(
            cmd,
            Command::Stock {
                query: "Alphabet".to_string()
            }
        );
    }

    #[test]
    fn test_parse_addressed_command() {
        let cmd = Command::parse("/stock@StockMarketBot NFLX").unwrap();
        assert_eq!(
            cmd,
            Command::Stock {
                query: "NFLX".to_string()
            }
        );
        assert_eq!(Command::parse("/start@StockMarketBot").unwrap(), Command::Start);
    }

    #[test]
    fn test_parse_missing_arg() {
        let err = Command::parse("/stock").unwrap_err();
        assert_eq!(err.to_string(), STOCK_USAGE);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse("/start").unwrap(), Command::Start);
        assert_eq!(Command::parse("/HELP").unwrap(), Command::Help);
        assert_eq!(Command::parse("/quit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_plain_text() {
        let cmd = Command::parse("  tesla ").unwrap();
        assert_eq!(
            cmd,
            Command::Query {
                text: "tesla".to_string()
            }
        );
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        let err = Command::parse("/analyze AAPL").unwrap_err();
        assert!(err.to_string().contains("/analyze"));
        assert!(Command::parse("   ").is_err());
        assert!(Command::parse("/").is_err());
    }

    #[test]
    fn test_welcome_mentions_usage() {
        assert!(Command::welcome_text().starts_with("Welcome to the Stock Market Bot!"));
        assert!(Command::welcome_text().contains("/stock netflix"));
    }
}
