//! Triage Relay - Main Entry Point
//!
//! Reads alerts as JSON lines on stdin and echoes each one back on stdout
//! after it has been triaged.

use std::io;

use anyhow::Context;
use triage_relay::{Config, TriageSession};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Triage Relay v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;
    log::info!(
        "Dispatching to Lambda {} in {}",
        config.aws_lambda_function,
        config.aws_region
    );

    let mut session = TriageSession::from_config(config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let handled = session
        .relay(stdin.lock(), stdout.lock())
        .context("Alert relay stopped")?;

    log::info!("Input closed after {} alerts, shutting down", handled);
    Ok(())
}
