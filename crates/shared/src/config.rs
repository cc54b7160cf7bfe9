//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::AppError;
use crate::types::money::{DEFAULT_QUANTIZATION, MAX_QUANTIZATION};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Pricing schedule configuration.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Decimal places every rendered amount carries.
    #[serde(default = "default_quantization")]
    pub quantization: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quantization: default_quantization(),
        }
    }
}

fn default_quantization() -> u32 {
    DEFAULT_QUANTIZATION
}

/// Pricing schedule configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingConfig {
    /// JSON file holding the pricing schedule used when a preview request
    /// carries none.
    #[serde(default)]
    pub schedule_path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "reckon=info".to_string()
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `RECKON__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a source cannot be read or the result
    /// fails validation.
    pub fn load() -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("RECKON")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the offending key.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.engine.quantization > MAX_QUANTIZATION {
            return Err(AppError::Config(format!(
                "engine.quantization must be between 0 and {MAX_QUANTIZATION}, got {}",
                self.engine.quantization
            )));
        }
        Ok(())
    }
}
