use layoutkit_settings::{Config, ConfigError, LogLevel, SettingsError};
use std::path::PathBuf;

#[test]
fn test_toml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.editor.default_zoom = 1.5;
    config.editor.grid_snap = true;
    config.logging.level = LogLevel::Debug;
    config.logging.file = Some(PathBuf::from("/tmp/layoutkit.log"));
    config.add_recent_file(PathBuf::from("/data/site.json"));
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::default();
    config.render.background = "#000000".to_string();
    config.save_to_file(&path).unwrap();

    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[editor]\ngrid_snap = true\n\n[logging]\nlevel = \"warn\"\n",
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert!(config.editor.grid_snap);
    assert_eq!(config.editor.default_zoom, 1.0);
    assert_eq!(config.logging.level, LogLevel::Warn);
    assert_eq!(config.render.handle_color, "#1976d2");
    assert_eq!(config.max_recent_files, 10);
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[editor]\ndefault_zoom = 0.05\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ValueOutOfRange { .. })
    ));
}

#[test]
fn test_unknown_log_level_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_invalid_config_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::default();
    config.editor.history_limit = 0;

    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::default()
        .save_to_file(&dir.path().join("config.yaml"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Config error: Unsupported config format: yaml");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    assert_eq!(Config::load_or_default_from(&path).unwrap(), Config::default());

    Config::default().save_to_file(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_missing_file_is_a_load_error() {
    let err = Config::load_from_file(std::path::Path::new("/nonexistent/config.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError { .. }));
}
