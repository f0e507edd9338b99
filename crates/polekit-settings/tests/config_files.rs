//! File round trips for the editor configuration

use polekit_designer::ViewMode;
use polekit_settings::{Config, ConfigError, SettingsError};

#[test]
fn test_toml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::new();
    config.snap.max_distance = 45.0;
    config.grid.visible = false;
    config.ui.initial_view = ViewMode::ThreeD;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("polekit.json");

    let mut config = Config::new();
    config.bridge.offset = 250.0;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.bridge.offset, 250.0);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[poles]\ndefault_height = 8.0\n\n[ui]\ninitial_view = \"3d\"\n",
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.poles.default_height, 8.0);
    assert_eq!(config.ui.initial_view, ViewMode::ThreeD);
    assert_eq!(config.snap.spacing_px, 50.0);
    assert_eq!(config.ui.surface_width, 1200.0);
}

#[test]
fn test_invalid_values_are_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "grid": { "size": -5 } }"#).unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ValueOutOfRange { ref key, .. }) if key == "grid.size"
    ));
}

#[test]
fn test_malformed_file_reports_parser_error() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("config.json");
    std::fs::write(&json, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&json),
        Err(SettingsError::JsonError(_))
    ));

    let toml_path = dir.path().join("config.toml");
    std::fs::write(&toml_path, "[snap\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&toml_path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    assert!(matches!(
        Config::new().save_to_file(&path),
        Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_load_or_default_with_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let config = Config::load_or_default(Some(&path)).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_options_build_an_editor() {
    let mut config = Config::new();
    config.poles.default_height = 3.0;
    let mut editor = polekit_designer::Editor::new(config.editor_options().unwrap());
    editor.choose_profile("circular").unwrap();
    editor.handle_input(polekit_designer::InputEvent::Click {
        pos: polekit_designer::Point::new(100.0, 750.0),
        button: polekit_designer::PointerButton::Primary,
        modifiers: polekit_designer::Modifiers::NONE,
    });
    assert_eq!(editor.poles()[0].height, 3.0);
}
