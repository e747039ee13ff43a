//! Terminal REPL
//!
//! Reads one line at a time and prints the reply. Plain text is looked up the
//! same way as `/stock <text>`.

use crate::bot::{Command, GOODBYE, StockBot};
use crate::error::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Default prompt
pub const PROMPT: &str = ">>> ";

pub struct CliBot {
    bot: StockBot,
    prompt: String,
}

impl CliBot {
    pub fn new(bot: StockBot) -> Self {
        Self {
            bot,
            prompt: PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Run against the process stdin and stdout
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        self.run_with(stdin, &mut stdout).await
    }

    /// Run until end of input or an exit command
    pub async fn run_with<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "{}\n", Command::welcome_text())?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}", self.prompt)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out, "\n{GOODBYE}")?;
                break;
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match Command::parse(line) {
                Ok(Command::Exit) => {
                    writeln!(out, "{GOODBYE}")?;
                    break;
                }
                Ok(command) => {
                    let reply = self.bot.execute_command(command).await;
                    writeln!(out, "{reply}\n")?;
                }
                Err(err) => writeln!(out, "{err}\n")?,
            }
        }

        Ok(())
    }
}
