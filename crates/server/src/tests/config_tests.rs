use super::{normalize_database_url, Settings};

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
}

#[test]
fn normalizes_single_colon_sqlite_prefix() {
    assert_eq!(
        normalize_database_url("sqlite:data\\test.db"),
        "sqlite://data/test.db"
    );
}

#[test]
fn keeps_memory_and_full_urls() {
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url(" sqlite://./x.db "),
        "sqlite://./x.db"
    );
    assert_eq!(
        normalize_database_url(""),
        Settings::default().database_url
    );
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    settings.apply_file(
        r#"
        bind_addr = "0.0.0.0:9000"
        database_url = "sqlite://./folders.db"
        openai_base_url = "http://localhost:4000/v1"
        "#,
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.database_url, "sqlite://./folders.db");
    assert_eq!(settings.openai_base_url, "http://localhost:4000/v1");
    assert!(settings.openai_api_key.is_none());
}

#[test]
fn malformed_file_is_ignored() {
    let mut settings = Settings::default();
    settings.apply_file("bind_addr = [1, 2");
    assert_eq!(settings.server_bind, Settings::default().server_bind);
}

#[test]
fn prefixed_env_wins_over_bare_env() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[
        ("SERVER_BIND", "127.0.0.1:1"),
        ("APP__BIND_ADDR", "127.0.0.1:2"),
        ("OPENAI_API_KEY", "sk-bare"),
        ("APP__OPENAI_API_KEY", "sk-prefixed"),
    ]));
    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.openai_api_key.as_deref(), Some("sk-prefixed"));
}

#[test]
fn blank_api_key_counts_as_missing() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[("OPENAI_API_KEY", "  ")]));
    assert!(settings.openai_api_key.is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[("OPENAI_API_KEY", "sk-secret")]));
    let debug = format!("{settings:?}");
    assert!(!debug.contains("sk-secret"));
}

#[tokio::test]
async fn normalized_path_opens_a_sqlite_file_in_a_new_directory() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("server.db");

    let url = normalize_database_url(db_path.to_string_lossy().as_ref());
    let storage = storage::Storage::new(&url).await.expect("open sqlite");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should be created: {}",
        db_path.display()
    );
}
