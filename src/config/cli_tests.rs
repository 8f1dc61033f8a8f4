//! Tests for CLI argument parsing.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use super::cli::{Cli, Command, EventVersionArg};

mod parsing {
    use super::*;

    #[test]
    fn parse_simple_subcommand() {
        let cli = Cli::parse_from_iter(["abacatepay", "store"]);

        assert!(matches!(cli.command, Command::Store));
        assert!(cli.api_key.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "abacatepay",
            "billings",
            "--api-key",
            "abc_dev_1",
            "--api-version",
            "2",
            "--timeout",
            "5",
            "--retry-max",
            "4",
            "-v",
        ]);

        assert!(matches!(cli.command, Command::Billings));
        assert_eq!(cli.api_key.as_deref(), Some("abc_dev_1"));
        assert_eq!(cli.api_version, Some(2));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.retry_max, Some(4));
        assert!(cli.verbose);
    }

    #[test]
    fn config_path_short_flag() {
        let cli = Cli::parse_from_iter(["abacatepay", "-c", "my.toml", "coupons"]);

        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["abacatepay"]).is_err());
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn init_defaults() {
        let cli = Cli::parse_from_iter(["abacatepay", "init"]);

        assert!(cli.is_init());
        assert!(!cli.needs_api_key());
        match cli.command {
            Command::Init { output, force } => {
                assert!(output.is_none());
                assert!(!force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn init_with_output_and_force() {
        let cli = Cli::parse_from_iter(["abacatepay", "init", "-o", "cfg.toml", "--force"]);

        match cli.command {
            Command::Init { output, force } => {
                assert_eq!(output, Some(PathBuf::from("cfg.toml")));
                assert!(force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn withdraws_by_external_id() {
        let cli = Cli::parse_from_iter(["abacatepay", "withdraws", "--external-id", "wd-1"]);

        match cli.command {
            Command::Withdraws { external_id } => assert_eq!(external_id.as_deref(), Some("wd-1")),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn pix_status_takes_positional_id() {
        let cli = Cli::parse_from_iter(["abacatepay", "pix-status", "pix_char_123"]);

        assert!(cli.needs_api_key());
        match cli.command {
            Command::PixStatus { id } => assert_eq!(id, "pix_char_123"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn mrr_revenue_range_parses_dates() {
        let cli = Cli::parse_from_iter([
            "abacatepay",
            "mrr",
            "--start",
            "2025-01-01",
            "--end",
            "2025-01-31",
        ]);

        match cli.command {
            Command::Mrr { start, end } => {
                assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 1));
                assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 31));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn mrr_start_requires_end() {
        assert!(Cli::try_parse_from(["abacatepay", "mrr", "--start", "2025-01-01"]).is_err());
    }

    #[test]
    fn mrr_rejects_bad_date() {
        assert!(
            Cli::try_parse_from([
                "abacatepay",
                "mrr",
                "--start",
                "01/01/2025",
                "--end",
                "2025-01-31"
            ])
            .is_err()
        );
    }

    #[test]
    fn verify_webhook_defaults_to_v2() {
        let cli = Cli::parse_from_iter(["abacatepay", "verify-webhook", "--body", "body.json"]);

        assert!(!cli.needs_api_key());
        match cli.command {
            Command::VerifyWebhook {
                body,
                signature,
                event_version,
            } => {
                assert_eq!(body, PathBuf::from("body.json"));
                assert!(signature.is_none());
                assert_eq!(event_version, EventVersionArg::V2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verify_webhook_v1_with_signature() {
        let cli = Cli::parse_from_iter([
            "abacatepay",
            "verify-webhook",
            "--body",
            "b.json",
            "--signature",
            "abc=",
            "--event-version",
            "v1",
        ]);

        match cli.command {
            Command::VerifyWebhook {
                signature,
                event_version,
                ..
            } => {
                assert_eq!(signature.as_deref(), Some("abc="));
                assert_eq!(event_version, EventVersionArg::V1);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
