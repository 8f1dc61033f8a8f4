//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with global options and subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// AbacatePay command-line client
///
/// Queries the AbacatePay API and checks webhook deliveries. The API key
/// is read from `--api-key`, `ABACATEPAY_API_KEY` or the config file.
#[derive(Debug, Parser)]
#[command(name = "abacatepay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Secret API key (overrides ABACATEPAY_API_KEY)
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// API base URL, without the version segment
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// API version
    #[arg(long = "api-version", global = true)]
    pub api_version: Option<u32>,

    /// Per-attempt timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of attempts per call
    #[arg(long = "retry-max", global = true)]
    pub retry_max: Option<u32>,

    /// Webhook secret (overrides ABACATEPAY_WEBHOOK_SECRET)
    #[arg(long = "webhook-secret", global = true)]
    pub webhook_secret: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for abacatepay
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path (default: the platform config directory)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show store details and balances
    Store,

    /// List customers
    Customers,

    /// List billings
    Billings,

    /// List coupons
    Coupons,

    /// List withdraws, or fetch one by external id
    Withdraws {
        /// External id given when the withdraw was created
        #[arg(long = "external-id")]
        external_id: Option<String>,
    },

    /// Check the status of a PIX QR code
    PixStatus {
        /// QR code id (`pix_char_...`)
        id: String,
    },

    /// Show MRR and merchant info, or revenue for a date range
    Mrr {
        /// First day of the revenue range (YYYY-MM-DD)
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,

        /// Last day of the revenue range (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,
    },

    /// Verify a captured webhook body against the configured secret
    VerifyWebhook {
        /// File holding the raw request body
        #[arg(long)]
        body: PathBuf,

        /// Value of the x-webhook-signature header; prints the expected
        /// signature when omitted
        #[arg(long)]
        signature: Option<String>,

        /// Event schema version
        #[arg(long = "event-version", value_enum, default_value = "v2")]
        event_version: EventVersionArg,
    },
}

/// Webhook schema version argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventVersionArg {
    /// `billing.paid`, `withdraw.done`, `withdraw.failed`
    #[value(name = "v1")]
    V1,
    /// `billing.paid`, `payout.done`, `payout.failed`
    #[value(name = "v2")]
    V2,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }

    /// Returns true if the command talks to the API.
    #[must_use]
    pub const fn needs_api_key(&self) -> bool {
        !matches!(
            self.command,
            Command::Init { .. } | Command::VerifyWebhook { .. }
        )
    }
}
