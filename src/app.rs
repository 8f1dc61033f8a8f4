//! Process-level glue for the binary: exit codes, log setup and
//! configuration hints printed after a failed start.

use abacatepay::config::{ConfigError, Environment, field};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1).
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2): failed API call or rejected webhook.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints a follow-up hint for configuration errors the user can fix locally.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

fn config_hint(error: &ConfigError) -> Option<String> {
    const INIT: &str = "run 'abacatepay init' to generate a configuration template";

    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::API_KEY => Some(format!(
            "Set {} or {INIT}.",
            Environment::API_KEY_VAR
        )),
        ConfigError::MissingRequired { field: f, .. } if *f == field::WEBHOOK_SECRET => Some(
            format!("Set {} or {INIT}.", Environment::WEBHOOK_SECRET_VAR),
        ),
        ConfigError::FileRead { .. } | ConfigError::NoConfigDir => {
            Some(format!("Pass --config <path> or {INIT}."))
        }
        ConfigError::FileExists { .. } => {
            Some("Re-run with --force to replace the existing file.".to_string())
        }
        _ => None,
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credentials_name_their_environment_variable() {
        let api_key = config_hint(&ConfigError::missing(field::API_KEY, "hint")).unwrap();
        let secret = config_hint(&ConfigError::missing(field::WEBHOOK_SECRET, "hint")).unwrap();

        assert!(api_key.contains("ABACATEPAY_API_KEY"));
        assert!(secret.contains("ABACATEPAY_WEBHOOK_SECRET"));
    }

    #[test]
    fn validation_errors_have_no_hint() {
        assert!(config_hint(&ConfigError::InvalidVersion(3)).is_none());
    }
}
