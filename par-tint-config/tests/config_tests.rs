//! File-level loading tests for par-tint-config.

use par_tint_config::{ConfigError, RulesConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn load_from_reads_a_rules_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");
    fs::write(
        &path,
        "command_char: '^'\nrules:\n  - pattern: \"panic\"\n    style: bold red\n",
    )
    .unwrap();

    let config = RulesConfig::load_from(&path).unwrap();
    assert_eq!(config.command_char, '^');
    assert_eq!(config.rules.len(), 1);
    assert_eq!(config.rules[0].pattern, "panic");
}

#[test]
fn load_from_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = RulesConfig::load_from(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn resolve_path_prefers_a_readable_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("override.yaml");
    fs::write(&path, "rules: []\n").unwrap();

    let resolved = RulesConfig::resolve_path(Some(&path)).unwrap();
    assert_eq!(resolved, path);
}

#[test]
fn load_with_explicit_path_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");
    fs::write(&path, "rules:\n  - pattern: \"ok\"\n    style: green\n").unwrap();

    let config = RulesConfig::load(Some(&path)).unwrap();
    assert_eq!(config.rules[0].style, "green");
}
