//! Configuration loading and validation

use bard_cli::{BardConfig, CliError};
use bard_mixer::FadeCurve;
fn no_env() -> Option<config::Map<String, String>> {
    Some(config::Map::new())
}

fn env(pairs: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    )
}

#[test]
fn test_defaults_are_valid() {
    let config = BardConfig::default();
    config.validate().expect("defaults must validate");

    assert_eq!(config.storage.database_url, "sqlite://./bard.db");
    assert_eq!(config.mixer.fade_in_ms, 2000);
    assert_eq!(config.mixer.fade_out_ms, 1000);
    assert_eq!(config.mixer.initial_master_volume, 1.0);
}

#[test]
fn test_load_from_file_with_partial_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bard.toml");
    std::fs::write(
        &path,
        r#"
[storage]
database_url = "sqlite:///srv/campaigns/ravenloft.db"

[mixer]
fade_in_ms = 3000
curve = "s_curve"
"#,
    )
    .unwrap();

    let config = BardConfig::load_with_env(Some(&path), no_env()).unwrap();
    assert_eq!(
        config.storage.database_url,
        "sqlite:///srv/campaigns/ravenloft.db"
    );
    assert_eq!(config.mixer.fade_in_ms, 3000);
    assert_eq!(config.mixer.curve, FadeCurve::SCurve);
    // Unset keys keep their defaults
    assert_eq!(config.mixer.fade_out_ms, 1000);
    assert!(config.logging.filter.contains("bard_mixer"));
    config.validate().unwrap();
}

#[test]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bard.toml");
    std::fs::write(&path, "[mixer]\nfade_out_ms = 500\n").unwrap();

    let config = BardConfig::load_with_env(
        Some(&path),
        env(&[
            ("BARD_MIXER__FADE_OUT_MS", "750"),
            ("BARD_MIXER__INITIAL_MASTER_VOLUME", "0.5"),
            ("BARD_STORAGE__DATABASE_URL", "sqlite://./other.db"),
        ]),
    )
    .unwrap();

    assert_eq!(config.mixer.fade_out_ms, 750);
    assert_eq!(config.mixer.initial_master_volume, 0.5);
    assert_eq!(config.storage.database_url, "sqlite://./other.db");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = BardConfig::load_with_env(Some(&dir.path().join("absent.toml")), no_env());
    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = BardConfig::default();
    config.mixer.initial_master_volume = 1.2;
    assert!(matches!(config.validate(), Err(CliError::Config(_))));

    let mut config = BardConfig::default();
    config.mixer.fade_in_ms = 0;
    assert!(config.validate().is_err());

    let mut config = BardConfig::default();
    config.storage.database_url = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = BardConfig::default();
    config.logging.filter = "bard=loudest".to_string();
    assert!(config.validate().is_err());
}
