//! Configuration layer for the `abacatepay` CLI.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Environment variables ([`Environment`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **Environment**: `ABACATEPAY_API_KEY` and `ABACATEPAY_WEBHOOK_SECRET` only
//! 3. **TOML config file**: `--config`, or `<config_dir>/abacatepay/config.toml` if present
//! 4. **Built-in defaults**
//!
//! Retry delays, retryable statuses and the webhook signing key are
//! TOML-only.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command, EventVersionArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{
    Environment, ValidatedConfig, default_config_path, expand_tilde, write_default_config,
};
