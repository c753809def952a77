//! Integration tests for configuration loading and path resolution
//!
//! Uses serial_test to prevent ENV variable race conditions: tests that
//! manipulate SIGNA_* variables are marked with #[serial].

use serial_test::serial;
use signa_common::config::{self, TomlConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
port = 6000
dictionary_path = "/srv/signa/isl_gloss.json"
assets_dir = "/srv/signa/animations"

[logging]
level = "debug"

[translation]
fillers = ["um", "you know"]
max_phrase_words = 4

[playback]
completion_tolerance_ms = 20
transition_cooldown_ms = 100
placeholder_duration_ms = 500
silence_duration_ms = 750
sustain_hold_ms = 250
tick_interval_ms = 10
default_asset_duration_ms = 1200
asset_extension = "fbx"

[transcriber]
command = ["capture", "--seconds", "5"]
timeout_ms = 8000
"#;

#[test]
fn test_full_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("signa.toml");
    fs::write(&path, FULL_CONFIG).unwrap();

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.port, 6000);
    assert_eq!(config.dictionary_path, Some(PathBuf::from("/srv/signa/isl_gloss.json")));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.translation.fillers, vec!["um", "you know"]);
    assert_eq!(config.translation.max_phrase_words, 4);
    assert_eq!(config.playback.completion_tolerance_ms, 20);
    assert_eq!(config.playback.asset_extension, "fbx");
    assert_eq!(config.transcriber.command.len(), 3);
    assert_eq!(config.transcriber.timeout_ms, 8000);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let config = TomlConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.port, 5750);
    assert_eq!(config.translation.max_phrase_words, 3);
}

#[test]
fn test_invalid_values_are_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("signa.toml");
    fs::write(&path, "[translation]\nmax_phrase_words = 0\n").unwrap();

    assert!(TomlConfig::load_or_default(Some(&path)).is_err());
}

#[test]
fn test_unknown_fields_ignored() {
    let config = TomlConfig::from_toml_str("port = 5800\nfrontend = \"react\"\n").unwrap();
    assert_eq!(config.port, 5800);
}

#[test]
#[serial]
fn test_resolve_path_priority() {
    let var = "SIGNA_DICTIONARY";
    let cli = Path::new("/cli/dict.json");
    let toml = Path::new("/toml/dict.json");
    let default = || PathBuf::from("/default/dict.json");

    env::set_var(var, "/env/dict.json");
    assert_eq!(config::resolve_path(Some(cli), var, Some(toml), default), cli);
    assert_eq!(
        config::resolve_path(None, var, Some(toml), default),
        PathBuf::from("/env/dict.json")
    );

    env::remove_var(var);
    assert_eq!(config::resolve_path(None, var, Some(toml), default), toml);
    assert_eq!(
        config::resolve_path(None, var, None, default),
        PathBuf::from("/default/dict.json")
    );
}

#[test]
#[serial]
fn test_empty_env_var_is_ignored() {
    env::set_var("SIGNA_ASSETS_DIR", "");
    let resolved = config::resolve_path(None, "SIGNA_ASSETS_DIR", None, config::default_assets_dir);
    assert_eq!(resolved, config::default_assets_dir());
    env::remove_var("SIGNA_ASSETS_DIR");
}

#[test]
#[serial]
fn test_config_file_from_env() {
    env::set_var(config::CONFIG_ENV_VAR, "/tmp/signa-env.toml");
    assert_eq!(
        config::resolve_config_file(None),
        Some(PathBuf::from("/tmp/signa-env.toml"))
    );

    // CLI still wins
    let cli = Path::new("/tmp/signa-cli.toml");
    assert_eq!(config::resolve_config_file(Some(cli)), Some(cli.to_path_buf()));

    env::remove_var(config::CONFIG_ENV_VAR);
}

#[test]
fn test_default_locations() {
    assert!(config::default_dictionary_path().ends_with("isl_gloss.json"));
    assert!(config::default_assets_dir().ends_with("animations"));
}
