//! Validated configuration after merging CLI, environment and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::rest::{ReqwestClient, Rest, RetryPolicy};
use crate::webhook::WebhookConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Values read from process environment variables.
///
/// Kept separate from [`Cli`] so tests can inject them without touching
/// the process environment.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Environment {
    /// `ABACATEPAY_API_KEY`
    pub api_key: Option<String>,
    /// `ABACATEPAY_WEBHOOK_SECRET`
    pub webhook_secret: Option<String>,
}

impl Environment {
    /// Variable holding the API key.
    pub const API_KEY_VAR: &'static str = "ABACATEPAY_API_KEY";

    /// Variable holding the webhook secret.
    pub const WEBHOOK_SECRET_VAR: &'static str = "ABACATEPAY_WEBHOOK_SECRET";

    /// Reads the variables from the current process. Empty values count as unset.
    #[must_use]
    pub fn from_process() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            api_key: read(Self::API_KEY_VAR),
            webhook_secret: read(Self::WEBHOOK_SECRET_VAR),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Fully validated configuration ready for use by the application.
///
/// Credentials stay optional here: only the commands that need one call
/// [`ValidatedConfig::require_api_key`] or
/// [`ValidatedConfig::require_webhook_secret`].
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to merge CLI args, environment and an
/// optional TOML config. Priority is CLI > environment > TOML > defaults.
pub struct ValidatedConfig {
    /// Secret API key
    pub api_key: Option<String>,

    /// Base URL without the version segment
    pub base_url: Url,

    /// API version (1 or 2)
    pub version: u32,

    /// Per-attempt timeout
    pub timeout: Duration,

    /// Retry policy for API calls
    pub retry_policy: RetryPolicy,

    /// Webhook shared secret
    pub webhook_secret: Option<String>,

    /// Webhook signing key (defaults to the secret when unset)
    pub signing_key: Option<String>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("version", &self.version)
            .field("timeout", &self.timeout)
            .field("retry_policy", &self.retry_policy)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "signing_key",
                &self.signing_key.as_ref().map(|_| "<redacted>"),
            )
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, version: v{}, timeout: {}s, retry: {}x/{}ms..{}ms, \
             api_key: {}, webhook_secret: {} }}",
            self.base_url,
            self.version,
            self.timeout.as_secs(),
            self.retry_policy.max_attempts,
            self.retry_policy.base_delay.as_millis(),
            self.retry_policy.max_delay.as_millis(),
            if self.api_key.is_some() { "set" } else { "unset" },
            if self.webhook_secret.is_some() {
                "set"
            } else {
                "unset"
            },
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments, environment and
    /// optional TOML config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is invalid
    /// - The API version is not 1 or 2
    /// - The timeout is zero
    /// - The retry settings are inconsistent
    pub fn from_raw(
        cli: &Cli,
        env: &Environment,
        toml: Option<&TomlConfig>,
    ) -> Result<Self, ConfigError> {
        let api_key = non_empty(
            cli.api_key
                .clone()
                .or_else(|| env.api_key.clone())
                .or_else(|| toml.and_then(|t| t.api.key.clone())),
        );

        let webhook_secret = non_empty(
            cli.webhook_secret
                .clone()
                .or_else(|| env.webhook_secret.clone())
                .or_else(|| toml.and_then(|t| t.webhook.secret.clone())),
        );

        let signing_key = non_empty(toml.and_then(|t| t.webhook.signing_key.clone()));

        Ok(Self {
            api_key,
            base_url: Self::resolve_base_url(cli, toml)?,
            version: Self::resolve_version(cli, toml)?,
            timeout: Self::resolve_timeout(cli, toml)?,
            retry_policy: Self::build_retry_policy(cli, toml)?,
            webhook_secret,
            signing_key,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI, environment and config file.
    ///
    /// An explicit `--config` path must exist. Without one, the default
    /// location is used only if a file is present there.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli, env: &Environment) -> Result<Self, ConfigError> {
        let toml = match cli.config {
            Some(ref path) => Some(TomlConfig::load(&expand_tilde(path))?),
            None => match default_config_path() {
                Some(path) if path.is_file() => {
                    tracing::debug!("Using config file {}", path.display());
                    Some(TomlConfig::load(&path)?)
                }
                _ => None,
            },
        };

        Self::from_raw(cli, env, toml.as_ref())
    }

    /// Returns the API key or a hint on how to provide one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no key was configured.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::API_KEY,
                "Use --api-key, set ABACATEPAY_API_KEY, or set api.key in the config file",
            )
        })
    }

    /// Returns the webhook secret or a hint on how to provide one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no secret was configured.
    pub fn require_webhook_secret(&self) -> Result<&str, ConfigError> {
        self.webhook_secret.as_deref().ok_or_else(|| {
            ConfigError::missing(
                field::WEBHOOK_SECRET,
                "Use --webhook-secret, set ABACATEPAY_WEBHOOK_SECRET, or set webhook.secret in the config file",
            )
        })
    }

    /// Builds the request executor described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no API key was configured,
    /// or [`ConfigError::HttpClient`] if the HTTP client cannot be built.
    pub fn rest_client(&self) -> Result<Rest, ConfigError> {
        let api_key = self.require_api_key()?;
        let client = ReqwestClient::with_timeout(self.timeout).map_err(ConfigError::HttpClient)?;
        Ok(Rest::with_client(client, api_key)
            .with_base_url(self.base_url.clone())
            .with_version(self.version)
            .with_retry_policy(self.retry_policy.clone()))
    }

    /// Builds the webhook gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no secret was configured.
    pub fn webhook_config(&self) -> Result<WebhookConfig, ConfigError> {
        let config = WebhookConfig::new(self.require_webhook_secret()?);
        Ok(match self.signing_key {
            Some(ref key) => config.with_signing_key(key.as_str()),
            None => config,
        })
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_version(cli: &Cli, toml: Option<&TomlConfig>) -> Result<u32, ConfigError> {
        let version = cli
            .api_version
            .or_else(|| toml.and_then(|t| t.api.version))
            .unwrap_or(defaults::API_VERSION);

        match version {
            1 | 2 => Ok(version),
            other => Err(ConfigError::InvalidVersion(other)),
        }
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.api.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let base_delay_ms = retry
            .and_then(|r| r.base_delay_ms)
            .unwrap_or(defaults::RETRY_BASE_DELAY_MS);

        let max_delay_ms = retry
            .and_then(|r| r.max_delay_ms)
            .unwrap_or(defaults::RETRY_MAX_DELAY_MS);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if base_delay_ms > max_delay_ms {
            return Err(ConfigError::InvalidRetry(format!(
                "base_delay_ms ({base_delay_ms}) must be <= max_delay_ms ({max_delay_ms})"
            )));
        }

        let mut policy = RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_base_delay(Duration::from_millis(base_delay_ms))
            .with_max_delay(Duration::from_millis(max_delay_ms))
            .with_non_idempotent_retries(
                retry.and_then(|r| r.retry_non_idempotent).unwrap_or(false),
            );

        if let Some(statuses) = retry.and_then(|r| r.retryable_statuses.as_ref()) {
            if let Some(bad) = statuses.iter().find(|s| !(100..=599).contains(*s)) {
                return Err(ConfigError::InvalidRetry(format!(
                    "retryable status {bad} is not an HTTP status"
                )));
            }
            policy = policy.with_retryable_statuses(statuses.iter().copied());
        }

        Ok(policy)
    }
}

/// Default config file location: `<config_dir>/abacatepay/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(defaults::CONFIG_DIR_NAME)
            .join(defaults::CONFIG_FILE_NAME)
    })
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

/// Writes the default configuration template to a file.
///
/// Parent directories are created as needed. An existing file is kept
/// unless `force` is set.
///
/// # Errors
///
/// Returns an error if the file exists (without `force`) or cannot be written.
pub fn write_default_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::FileExists {
            path: path.to_path_buf(),
        });
    }

    let write_error = |e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(write_error)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
