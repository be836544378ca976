#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;

use std::process;

use anyhow::Context;
use starpoint_client::Client;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "starpoint_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "starpoint_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "starpoint_cli::config";

#[tokio::main]
async fn main() {
    let error = match run().await {
        Ok(true) => process::exit(0),
        Ok(false) => {
            tracing::debug!(target: TRACING_TARGET_SHUTDOWN, "operation returned an error");
            process::exit(2);
        }
        Err(error) => error,
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "command terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
///
/// Returns whether the operation succeeded.
async fn run() -> anyhow::Result<bool> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();

    let client = Client::new(cli.client.clone()).context("failed to create Starpoint client")?;
    let outcome = cli.command.execute(client).await?;

    let output =
        serde_json::to_string_pretty(&outcome.output).context("failed to format output")?;
    println!("{output}");

    Ok(outcome.success)
}
