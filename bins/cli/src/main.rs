//! Reckoning engine command line.
//!
//! Usage:
//!   reckon totals <lines.json>      - Reckon line items and print the calculation
//!   reckon preview <preview.json>   - Print the line items an invoice preview would carry
//!   reckon divide <amount> <parts>  - Split an amount into near-equal parts

mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use reckon_shared::AppConfig;

use crate::commands::Cli;

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    // stdout carries command output, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match commands::run(&cli.command, &config) {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            eprintln!("{err}");
            Ok(ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1)))
        }
    }
}
