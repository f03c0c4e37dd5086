//! Interactive read-dispatch loop.

use super::{commands, ui};
use crate::core::{ConverterError, CurrencyApi};
use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    List,
    Convert,
    Rate,
    Help,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "q" => Ok(Command::Quit),
            "list" => Ok(Command::List),
            "convert" => Ok(Command::Convert),
            "rate" => Ok(Command::Rate),
            "help" => Ok(Command::Help),
            _ => bail!("Unrecognized command: {}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingCommand,
    Executing(Command),
    Terminated,
}

/// One interactive session over an input reader and an output writer.
///
/// Errors from the converter are printed and the session goes on; only
/// failures to read or write the terminal end it.
pub struct Session<'a, A: ?Sized, R, W> {
    api: &'a A,
    input: R,
    output: W,
    progress: bool,
    state: SessionState,
}

impl<'a, A, R, W> Session<'a, A, R, W>
where
    A: CurrencyApi + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(api: &'a A, input: R, output: W) -> Self {
        Session {
            api,
            input,
            output,
            progress: false,
            state: SessionState::AwaitingCommand,
        }
    }

    /// Show a spinner on stderr while requests are running.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> Result<()> {
        self.print_banner()?;

        while self.state != SessionState::Terminated {
            let Some(line) = self.prompt("Enter a command (q to quit): ")? else {
                self.state = SessionState::Terminated;
                break;
            };
            if line.is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    self.state = SessionState::Executing(command);
                    let result = self.execute(command).await;
                    self.report(result)?;
                    if self.state != SessionState::Terminated {
                        self.state = SessionState::AwaitingCommand;
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Ignoring input");
                    let message = ui::style_text("Unrecognized command!", ui::StyleType::Error);
                    writeln!(self.output, "{message}")?;
                }
            }
        }

        debug!("Session terminated");
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::List => {
                commands::list(self.api, &mut self.output, self.progress).await?;
            }
            Command::Convert => {
                let Some(from) = self.prompt_currency("Enter a base currency: ")? else {
                    return Ok(());
                };
                let Some(amount) = self.prompt(&format!("Enter an amount in {from}: "))? else {
                    self.state = SessionState::Terminated;
                    return Ok(());
                };
                let Some(to) = self.prompt_currency("Enter a currency to convert to: ")? else {
                    return Ok(());
                };
                commands::convert(
                    self.api,
                    &mut self.output,
                    &from,
                    &to,
                    &amount,
                    self.progress,
                )
                .await?;
            }
            Command::Rate => {
                let Some(from) = self.prompt_currency("Enter a base currency: ")? else {
                    return Ok(());
                };
                let Some(to) = self.prompt_currency("Enter a currency to convert to: ")? else {
                    return Ok(());
                };
                commands::rate(self.api, &mut self.output, &from, &to, self.progress).await?;
            }
            Command::Help => self.print_banner()?,
            Command::Quit => self.state = SessionState::Terminated,
        }
        Ok(())
    }

    /// Converter errors are shown to the user; anything else ends the session.
    fn report(&mut self, result: Result<()>) -> Result<()> {
        let Err(e) = result else {
            return Ok(());
        };
        match e.downcast_ref::<ConverterError>() {
            Some(err) => {
                warn!(error = %err, "Command failed");
                let message = ui::style_text(&err.to_string(), ui::StyleType::Error);
                writeln!(self.output, "{message}")?;
                Ok(())
            }
            None => Err(e),
        }
    }

    /// Writes `message`, then reads one trimmed line. `None` on end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_currency(&mut self, message: &str) -> Result<Option<String>> {
        let code = self.prompt(message)?.map(|code| code.to_uppercase());
        if code.is_none() {
            self.state = SessionState::Terminated;
        }
        Ok(code)
    }

    fn print_banner(&mut self) -> Result<()> {
        let title = ui::style_text("Welcome to the currency converter!", ui::StyleType::Title);
        writeln!(self.output, "{title}")?;
        for (command, description) in [
            ("List", "lists the different currencies"),
            ("Convert", "convert from one currency to another"),
            ("Rate", "get the exchange rate of two currencies"),
            ("Help", "show this message again"),
        ] {
            writeln!(
                self.output,
                "{} - {description}",
                ui::style_text(command, ui::StyleType::Command)
            )?;
        }
        writeln!(
            self.output,
            "{}",
            ui::style_text("Commands are case-insensitive.", ui::StyleType::Subtle)
        )?;
        writeln!(self.output)?;
        Ok(())
    }
}
