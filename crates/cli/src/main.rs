//! `docscan` -- validate fields extracted from scanned identity documents.
//!
//! Prints one JSON document to stdout per invocation. Logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable                         | Required | Default | Description                        |
//! |----------------------------------|----------|---------|------------------------------------|
//! | `DOCSCAN_EXTRACTOR_CMD`          | no       | --      | Extractor command line for `extract` |
//! | `DOCSCAN_EXTRACTOR_TIMEOUT_SECS` | no       | `120`   | Extractor timeout                  |
//! | `DOCSCAN_LOG_FORMAT`             | no       | `text`  | `text` or `json`                   |
//! | `RUST_LOG`                       | no       | `docscan=info,...` | Tracing filter          |
//!
//! # Exit codes
//!
//! `0` accepted, `2` rejected, `1` any other error.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docscan_cli::args::Cli;
use docscan_cli::commands;
use docscan_cli::config::{CliConfig, LogFormat, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("docscan: {e}");
            return ExitCode::from(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    let mut stdout = std::io::stdout().lock();
    match commands::run(cli.command, &config, &mut stdout).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) if commands::is_input_error(&e) => {
            tracing::warn!(error = %format!("{e:#}"), "Invalid input");
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Command failed");
            ExitCode::from(1)
        }
    }
}
