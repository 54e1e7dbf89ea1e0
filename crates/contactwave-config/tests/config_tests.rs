// SPDX-FileCopyrightText: 2026 ContactWave Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the ContactWave configuration system.

use contactwave_config::diagnostic::ConfigError;
use contactwave_config::model::WaveConfig;
use contactwave_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_wave_config() {
    let toml = r#"
[server]
base_url = "https://wave.example.com"
timeout_secs = 30

[session]
identity = "asha@example.com"
cookie = "connect.sid=abc123"

[logging]
level = "debug"

[attachments]
max_bytes = 1048576
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.base_url, "https://wave.example.com");
    assert_eq!(config.server.timeout_secs, 30);
    assert_eq!(config.session.identity.as_deref(), Some("asha@example.com"));
    assert_eq!(config.session.cookie.as_deref(), Some("connect.sid=abc123"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.attachments.max_bytes, 1_048_576);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.base_url, "http://localhost:5000");
    assert_eq!(config.server.timeout_secs, 120);
    assert!(config.session.identity.is_none());
    assert!(config.session.cookie.is_none());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.attachments.max_bytes, 5 * 1024 * 1024);
}

/// Unknown field in [server] is rejected.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
base_ulr = "http://x"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ulr"),
        "error should mention the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn unknown_top_level_section_is_rejected() {
    let toml = r#"
[database]
path = "x.db"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Overrides merged on top of the file win, mirroring env var precedence.
#[test]
fn later_providers_override_file_values() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: WaveConfig = Figment::new()
        .merge(Serialized::defaults(WaveConfig::default()))
        .merge(Toml::string("[server]\nbase_url = \"http://from-file\""))
        .merge(("server.base_url", "http://from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.server.base_url, "http://from-env");
}

/// Unknown key produces an UnknownKey diagnostic with a suggestion.
#[test]
fn diagnostic_suggests_correct_key() {
    let toml = r#"
[server]
base_ulr = "http://x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. }
            if key == "base_ulr"
                && suggestion.as_deref() == Some("base_url")
                && valid_keys.contains("timeout_secs"))
    });
    assert!(found, "expected UnknownKey for base_ulr, got: {errors:?}");
}

/// Wrong value type is reported as InvalidType.
#[test]
fn diagnostic_invalid_type() {
    let toml = r#"
[server]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("timeout_secs"))),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_rejects_zero_timeout() {
    let toml = r#"
[server]
timeout_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero timeout should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("timeout_secs"))
    ));
}

/// ConfigError renders through miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "base_ulr".to_string(),
        suggestion: Some("base_url".to_string()),
        valid_keys: "base_url, timeout_secs".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `base_url`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("base_ulr"));
}

/// Loading an explicit file validates it too.
#[test]
fn load_and_validate_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contactwave.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    let config = contactwave_config::load_and_validate_path(&path).expect("file should load");
    assert_eq!(config.logging.level, "warn");
}
