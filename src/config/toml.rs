//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments and the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API connection section
    #[serde(default)]
    pub api: ApiSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Webhook receiver section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Secret API key (`abc_dev_...` / `abc_prod_...`)
    pub key: Option<String>,

    /// Base URL without the version segment
    pub base_url: Option<String>,

    /// API version (1 or 2)
    pub version: Option<u32>,

    /// Per-attempt timeout in seconds
    pub timeout: Option<u64>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts, including the first
    pub max_attempts: Option<u32>,

    /// Delay before the first retry, in milliseconds
    pub base_delay_ms: Option<u64>,

    /// Cap on the backoff delay, in milliseconds
    pub max_delay_ms: Option<u64>,

    /// Statuses treated as transient
    pub retryable_statuses: Option<Vec<u16>>,

    /// Retry POST/PATCH after ambiguous failures
    pub retry_non_idempotent: Option<bool>,
}

/// Webhook receiver section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Shared secret expected in the `webhookSecret` query parameter
    pub secret: Option<String>,

    /// HMAC key for `x-webhook-signature` (defaults to the secret)
    pub signing_key: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# AbacatePay CLI configuration
# Values here are overridden by environment variables and CLI flags.

[api]
# Secret API key (prefer the ABACATEPAY_API_KEY environment variable)
# key = "abc_dev_..."

# Base URL, without the /v1 or /v2 segment
# base_url = "https://api.abacatepay.com"

# API version: 1 or 2 (default: 1)
# version = 1

# Per-attempt timeout in seconds (default: 30)
# timeout = 30

[retry]
# Maximum number of attempts, including the first (default: 3)
# max_attempts = 3

# Delay before the first retry in milliseconds (default: 300)
# base_delay_ms = 300

# Cap on the backoff delay in milliseconds (default: 10000)
# max_delay_ms = 10000

# Statuses treated as transient
# retryable_statuses = [408, 425, 429, 500, 502, 503, 504]

# Retry POST/PATCH after timeouts and 5xx responses (may duplicate charges)
# retry_non_idempotent = false

[webhook]
# Shared secret sent by AbacatePay in the webhookSecret query parameter
# (prefer the ABACATEPAY_WEBHOOK_SECRET environment variable)
# secret = "whsec_..."

# HMAC key for the x-webhook-signature header (default: the secret)
# signing_key = "..."
"#
    .to_string()
}
