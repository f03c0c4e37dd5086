pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::repl::Session;
use crate::core::config::AppConfig;
use crate::providers::CurrConvClient;
use anyhow::{Context, Result};
use std::io::{BufRead, IsTerminal, Write};
use tracing::{debug, info};

/// Builds the HTTP client described by `config`.
pub fn build_client(config: &AppConfig) -> Result<CurrConvClient> {
    let api_key = config.api_key()?;
    CurrConvClient::new(&config.base_url, api_key, config.timeout()?)
        .with_context(|| format!("Failed to create client for {}", config.base_url))
}

/// Runs an interactive session on the process's stdin and stdout.
pub async fn run(config_path: Option<&str>, api_key: Option<String>) -> Result<()> {
    info!("Currency converter starting...");

    let config = AppConfig::resolve(config_path, api_key)?;
    let client = build_client(&config)?;
    debug!(?client, "Client ready");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let show_progress = stdout.is_terminal();

    let mut session =
        Session::new(&client, stdin.lock(), stdout.lock()).with_progress(show_progress);
    session.run().await
}

/// Runs a session for `config` over arbitrary streams.
pub async fn run_session<R, W>(config: &AppConfig, input: R, output: W) -> Result<W>
where
    R: BufRead,
    W: Write,
{
    let client = build_client(config)?;
    let mut session = Session::new(&client, input, output);
    session.run().await?;
    Ok(session.into_output())
}
