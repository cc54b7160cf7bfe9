//! Subcommands of the `reckon` binary.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use reckon_core::LineItem;
use reckon_core::preview::{PreviewConfig, Pricing, build_preview_lines};
use reckon_core::reckoning::{divide_amount, reckon};
use reckon_shared::types::{money_string, parse_decimal};
use reckon_shared::{AppConfig, AppError, AppResult};

/// Reckoning engine command line.
#[derive(Debug, Parser)]
#[command(name = "reckon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Reckon a JSON array of line items
    Totals {
        /// File holding the line items
        path: PathBuf,
    },
    /// Build preview lines from a JSON preview config
    Preview {
        /// File holding the preview config
        path: PathBuf,
    },
    /// Split an amount into near-equal parts
    Divide {
        /// Already-quantised amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Number of parts
        parts: u16,
    },
}

/// Runs `command` and returns what it prints.
pub fn run(command: &Command, config: &AppConfig) -> AppResult<String> {
    let quantization = config.engine.quantization;
    match command {
        Command::Totals { path } => totals(&read(path)?, quantization),
        Command::Preview { path } => {
            let mut preview: PreviewConfig = serde_json::from_str(&read(path)?)?;
            if preview.pricing.is_none()
                && let Some(schedule) = &config.pricing.schedule_path
            {
                debug!(path = %schedule.display(), "Using configured pricing schedule");
                preview.pricing = Some(load_pricing(schedule)?);
            }
            preview_lines(&preview)
        }
        Command::Divide { amount, parts } => divide(amount, *parts, quantization),
    }
}

fn read(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|err| AppError::Io(format!("{}: {err}", path.display())))
}

/// Reads a pricing schedule from a JSON file.
pub fn load_pricing(path: &Path) -> AppResult<Pricing> {
    Ok(serde_json::from_str(&read(path)?)?)
}

/// Reckons a JSON array of line items into a pretty-printed calculation.
pub fn totals(input: &str, quantization: u32) -> AppResult<String> {
    let lines: Vec<LineItem> = serde_json::from_str(input)?;
    let calculation = reckon(&lines, quantization)?;
    info!(lines = lines.len(), total = %calculation.total, "Reckoned");
    Ok(serde_json::to_string_pretty(&calculation)?)
}

/// Pretty-printed preview lines. An incomplete config prints `[]`.
pub fn preview_lines(preview: &PreviewConfig) -> AppResult<String> {
    let lines = build_preview_lines(preview);
    info!(lines = lines.len(), "Built invoice preview");
    Ok(serde_json::to_string_pretty(&lines)?)
}

/// One part per output line.
pub fn divide(amount: &str, parts: u16, quantization: u32) -> AppResult<String> {
    let amount = parse_decimal(amount)
        .map_err(|err| AppError::Usage(format!("amount '{amount}' is not a decimal: {err}")))?;
    let shares = divide_amount(amount, parts, quantization)?;
    Ok(shares
        .into_iter()
        .map(|share| money_string(share, quantization))
        .collect::<Vec<_>>()
        .join("\n"))
}
