use std::time::Duration;

use cvrank::cli::OutputFormat;
use cvrank::config::Config;

#[test]
fn test_full_config_document() {
    let config = Config::from_toml(
        r#"
        [scoring]
        skills = ["Rust", "Tokio"]
        extra_skills = ["Serde"]

        [records]
        person_label = "PER"
        fallback_name = "Anonymous"

        [store]
        file_name = "cvs.csv"
        retry_attempts = 1
        retry_backoff_ms = 0
        lock_timeout_ms = 250

        [output]
        format = "json"
        "#,
    )
    .unwrap();

    assert_eq!(config.vocabulary().terms(), ["Rust", "Tokio", "Serde"]);
    assert_eq!(config.naming().person_label, "PER");
    assert_eq!(config.naming().fallback_name, "Anonymous");
    assert_eq!(config.store.file_name, "cvs.csv");
    assert_eq!(config.retry_policy().attempts, 1);
    assert_eq!(config.retry_policy().backoff, Duration::ZERO);
    assert_eq!(config.lock_timeout(), Duration::from_millis(250));
    assert_eq!(config.output.format, OutputFormat::Json);
}

#[test]
fn test_empty_document_is_default() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.store.file_name, "records.csv");
    assert_eq!(config.naming().person_label, "PERSON");
}

#[test]
fn test_wrong_type_is_config_error() {
    let err = Config::from_toml("[store]\nretry_attempts = \"many\"\n").unwrap_err();
    assert_eq!(err.code(), "config_error");
}
