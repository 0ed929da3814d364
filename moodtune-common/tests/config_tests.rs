//! Unit tests for configuration loading and server URL resolution
//!
//! Uses serial_test to prevent ENV variable race conditions. Tests that
//! touch MOODTUNE_SERVER_URL are marked with #[serial].

use moodtune_common::config::{
    resolve_server_url, resolve_server_url_with_source, ClientConfig, ServerUrlSource, TomlConfig,
    DEFAULT_SERVER_URL, SERVER_URL_ENV,
};
use moodtune_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::time::Duration;

fn toml_with_url(url: &str) -> TomlConfig {
    TomlConfig {
        server_url: Some(url.to_string()),
        ..TomlConfig::default()
    }
}

#[test]
#[serial]
fn test_no_overrides_uses_compiled_default() {
    env::remove_var(SERVER_URL_ENV);

    let url = resolve_server_url(None, &TomlConfig::default()).unwrap();
    assert_eq!(url, DEFAULT_SERVER_URL);
}

#[test]
#[serial]
fn test_toml_beats_default() {
    env::remove_var(SERVER_URL_ENV);

    let url = resolve_server_url(None, &toml_with_url("http://toml.test:8000")).unwrap();
    assert_eq!(url, "http://toml.test:8000");
}

#[test]
#[serial]
fn test_env_beats_toml() {
    env::set_var(SERVER_URL_ENV, "http://env.test:7000/");

    let url = resolve_server_url(None, &toml_with_url("http://toml.test:8000")).unwrap();
    assert_eq!(url, "http://env.test:7000");

    env::remove_var(SERVER_URL_ENV);
}

#[test]
#[serial]
fn test_cli_beats_everything() {
    env::set_var(SERVER_URL_ENV, "http://env.test:7000");

    let url = resolve_server_url(
        Some("https://cli.test"),
        &toml_with_url("http://toml.test:8000"),
    )
    .unwrap();
    assert_eq!(url, "https://cli.test");

    env::remove_var(SERVER_URL_ENV);
}

#[test]
#[serial]
fn test_load_explicit_file() {
    env::remove_var(SERVER_URL_ENV);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
server_url = "http://file.test:5000"
request_timeout_secs = 15

[logging]
level = "debug"
"#
    )
    .unwrap();

    let config = ClientConfig::resolve(None, Some(file.path())).unwrap();
    assert_eq!(config.server_url, "http://file.test:5000");
    assert_eq!(config.request_timeout, Duration::from_secs(15));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.server_url_source, ServerUrlSource::TomlConfig);
    assert_eq!(config.config_file.as_deref(), Some(file.path()));
}

#[test]
#[serial]
fn test_source_reported_for_each_layer() {
    env::remove_var(SERVER_URL_ENV);
    let toml = toml_with_url("http://toml.test:8000");

    let (_, source) = resolve_server_url_with_source(None, &TomlConfig::default()).unwrap();
    assert_eq!(source, ServerUrlSource::CompiledDefault);

    let (_, source) = resolve_server_url_with_source(None, &toml).unwrap();
    assert_eq!(source, ServerUrlSource::TomlConfig);

    env::set_var(SERVER_URL_ENV, "http://env.test:7000");
    let (_, source) = resolve_server_url_with_source(None, &toml).unwrap();
    assert_eq!(source, ServerUrlSource::Environment);

    let (url, source) = resolve_server_url_with_source(Some("http://cli.test"), &toml).unwrap();
    assert_eq!(url, "http://cli.test");
    assert_eq!(source, ServerUrlSource::CommandLine);
    assert_eq!(source.to_string(), "command line");

    env::remove_var(SERVER_URL_ENV);
}

#[test]
#[serial]
fn test_invalid_server_url_is_invalid_input() {
    env::remove_var(SERVER_URL_ENV);

    let result = ClientConfig::from_toml(Some("ftp://cli.test"), &TomlConfig::default());
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = TomlConfig::load(Some(&missing));
    assert!(matches!(result, Err(Error::Io(_))));

    let result = ClientConfig::resolve(None, Some(&missing));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server_url = [not valid").unwrap();

    let result = TomlConfig::load(Some(file.path()));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let config = TomlConfig::from_toml_str("server_url = \"http://a.test\"").unwrap();
    assert_eq!(config.request_timeout_secs, 60);
    assert_eq!(config.logging.level, "info");
}
