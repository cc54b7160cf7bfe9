//! Shared types, errors, and configuration for the reckoning workspace.
//!
//! This crate provides what every other crate leans on:
//! - Fixed-point money helpers (quantisation, parsing, rendering)
//! - Application-wide error type
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
