//! `abacatepay` command-line client.
//!
//! Entry point for the abacatepay binary.

use abacatepay::config::{
    Cli, Command, ConfigError, Environment, ValidatedConfig, default_config_path, expand_tilde,
    write_default_config,
};
use std::path::Path;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Command::Init { output, force } = &cli.command {
        return handle_init(output.as_deref(), *force);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli, &Environment::from_process()) {
        Ok(config) => config,
        Err(e) => return config_failure(&e),
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_application(&cli.command, &config)
}

/// Handles the `init` subcommand.
fn handle_init(output: Option<&Path>, force: bool) -> ExitCode {
    let path = match output.map(expand_tilde).or_else(default_config_path) {
        Some(path) => path,
        None => return config_failure(&ConfigError::NoConfigDir),
    };

    match write_default_config(&path, force) {
        Ok(()) => {
            println!("Configuration template written to: {}", path.display());
            exit_code::SUCCESS
        }
        Err(e) => config_failure(&e),
    }
}

fn config_failure(error: &ConfigError) -> ExitCode {
    eprintln!("Configuration error: {error}");
    print_config_hint(error);
    exit_code::CONFIG_ERROR
}

/// Runs the selected command with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(command: &Command, config: &ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(command, config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(run::RunError::Config(e)) => config_failure(&e),
        Err(e) => {
            tracing::error!("{e}");
            if e.is_setup_error() {
                exit_code::CONFIG_ERROR
            } else {
                exit_code::runtime_error()
            }
        }
    }
}
