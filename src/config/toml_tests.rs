//! Tests for TOML configuration parsing.

use super::toml::{CountValue, TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let config = TomlConfig::parse(
            r#"
            [server]
            url = "http://127.0.0.1:3018/api"
        "#,
        )
        .unwrap();

        assert_eq!(
            config.server.url.as_deref(),
            Some("http://127.0.0.1:3018/api")
        );
        assert!(config.server.token.is_none());
    }

    #[test]
    fn parse_full_config() {
        let config = TomlConfig::parse(
            r#"
            [server]
            url = "https://admin.example.com/api"
            token = "secret"

            [server.headers]
            X-Tenant = "blue"

            [client]
            timeout = "30s"
            max_import_size = "512kb"

            [retry]
            max_attempts = 5
            initial_delay = "2s"
            max_delay = "1m"
            multiplier = 1.5
        "#,
        )
        .unwrap();

        assert_eq!(config.server.token.as_deref(), Some("secret"));
        assert_eq!(
            config.server.headers.get("X-Tenant").map(String::as_str),
            Some("blue")
        );
        assert_eq!(config.client.timeout.as_deref(), Some("30s"));
        assert_eq!(config.client.max_import_size.as_deref(), Some("512kb"));
        assert_eq!(config.retry.max_attempts, Some(CountValue::Number(5)));
        assert_eq!(config.retry.initial_delay.as_deref(), Some("2s"));
        assert_eq!(config.retry.max_delay.as_deref(), Some("1m"));
        assert_eq!(config.retry.multiplier, Some(1.5));
    }

    #[test]
    fn max_attempts_accepts_string() {
        let config = TomlConfig::parse(
            r#"
            [retry]
            max_attempts = "4"
        "#,
        )
        .unwrap();

        assert_eq!(
            config.retry.max_attempts,
            Some(CountValue::Text("4".to_string()))
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.server.url.is_none());
        assert!(config.server.headers.is_empty());
        assert!(config.client.timeout.is_none());
        assert!(config.retry.max_attempts.is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_section_is_rejected() {
        assert!(TomlConfig::parse("[database]\nurl = \"x\"").is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(TomlConfig::parse("[server]\naddress = \"x\"").is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(TomlConfig::parse("[client]\ntimeout = 10").is_err());
    }

    #[test]
    fn invalid_syntax_is_rejected() {
        assert!(TomlConfig::parse("[server\nurl =").is_err());
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("confsync.toml");
        std::fs::write(&path, "[server]\nurl = \"http://localhost/api\"\n").unwrap();

        let config = TomlConfig::load(&path).unwrap();

        assert_eq!(config.server.url.as_deref(), Some("http://localhost/api"));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = TomlConfig::load(&dir.path().join("missing.toml")).unwrap_err();

        assert!(matches!(err, super::super::ConfigError::FileRead { .. }));
    }
}

mod template {
    use super::*;

    #[test]
    fn template_parses() {
        let template = default_config_template();

        TomlConfig::parse(&template).unwrap();
    }

    #[test]
    fn template_documents_every_section() {
        let template = default_config_template();

        for section in ["[server]", "[client]", "[retry]"] {
            assert!(template.contains(section), "Missing {section}");
        }
        assert!(template.contains("max_import_size"));
    }
}
