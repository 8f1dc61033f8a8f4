//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.api.key.is_none());
        assert!(config.retry.max_attempts.is_none());
        assert!(config.webhook.secret.is_none());
    }

    #[test]
    fn parse_api_section() {
        let toml = r#"
            [api]
            key = "abc_dev_123"
            base_url = "http://localhost:8080"
            version = 2
            timeout = 10
        "#;

        let config = TomlConfig::parse(toml).unwrap();

        assert_eq!(config.api.key.as_deref(), Some("abc_dev_123"));
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.api.version, Some(2));
        assert_eq!(config.api.timeout, Some(10));
    }

    #[test]
    fn parse_retry_section() {
        let toml = r"
            [retry]
            max_attempts = 5
            base_delay_ms = 100
            max_delay_ms = 2000
            retryable_statuses = [429, 503]
            retry_non_idempotent = true
        ";

        let retry = TomlConfig::parse(toml).unwrap().retry;

        assert_eq!(retry.max_attempts, Some(5));
        assert_eq!(retry.base_delay_ms, Some(100));
        assert_eq!(retry.max_delay_ms, Some(2000));
        assert_eq!(retry.retryable_statuses, Some(vec![429, 503]));
        assert_eq!(retry.retry_non_idempotent, Some(true));
    }

    #[test]
    fn parse_webhook_section() {
        let toml = r#"
            [webhook]
            secret = "whsec_1"
            signing_key = "key_1"
        "#;

        let webhook = TomlConfig::parse(toml).unwrap().webhook;

        assert_eq!(webhook.secret.as_deref(), Some("whsec_1"));
        assert_eq!(webhook.signing_key.as_deref(), Some("key_1"));
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [api]
            token = "abc"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(TomlConfig::parse("[monitor]\npoll_interval = 60").is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(TomlConfig::parse("[api]\nversion = \"two\"").is_err());
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = TomlConfig::load(std::path::Path::new("/nonexistent/abacatepay.toml"));

        assert!(matches!(
            result,
            Err(super::super::ConfigError::FileRead { .. })
        ));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses_to_empty_config() {
        let config = TomlConfig::parse(&default_config_template()).unwrap();

        assert!(config.api.key.is_none());
        assert!(config.api.version.is_none());
        assert!(config.webhook.secret.is_none());
    }

    #[test]
    fn template_mentions_environment_variables() {
        let template = default_config_template();

        assert!(template.contains("ABACATEPAY_API_KEY"));
        assert!(template.contains("ABACATEPAY_WEBHOOK_SECRET"));
    }
}
