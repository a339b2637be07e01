//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_viewkit_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("viewkit") && path_str.ends_with("config.toml"),
            "Path should contain 'viewkit' and end with 'config.toml', got: {}",
            path_str
        );
    }
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("viewkit_test_config.toml");

    let toml_content = r#"
frame_interval_ms = 16
track_call_sites = true
page_size = 25
log_file_path = "/tmp/viewkit-test.log"
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.frame_interval_ms, Some(16));
    assert_eq!(config.track_call_sites, Some(true));
    assert_eq!(config.page_size, Some(25));
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/viewkit-test.log"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("viewkit_test_invalid.toml");
    fs::write(&config_path, "frame_interval_ms = [").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should produce ParseError, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = env::temp_dir().join("viewkit_test_unknown_field.toml");
    fs::write(&config_path, "theme = \"dark\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_without_file_returns_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_keeps_defaults_for_missing_fields() {
    let resolved = merge_config(Some(ConfigFile {
        page_size: Some(50),
        ..ConfigFile::default()
    }));

    assert_eq!(resolved.page_size, 50);
    assert_eq!(resolved.frame_interval_ms, 100);
}

#[test]
fn validate_rejects_zero_frame_interval() {
    let config = ResolvedConfig {
        frame_interval_ms: 0,
        ..ResolvedConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "frame_interval_ms",
            ..
        })
    ));
}

#[test]
fn validate_rejects_zero_page_size() {
    let config = ResolvedConfig {
        page_size: 0,
        ..ResolvedConfig::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn frame_interval_converts_to_duration() {
    let config = ResolvedConfig {
        frame_interval_ms: 16,
        ..ResolvedConfig::default()
    };
    assert_eq!(config.frame_interval(), Duration::from_millis(16));
}

#[test]
#[serial(env)]
fn env_override_sets_frame_interval() {
    env::set_var(FRAME_INTERVAL_ENV, "33");
    let config = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(FRAME_INTERVAL_ENV);

    assert_eq!(config.unwrap().frame_interval_ms, 33);
}

#[test]
#[serial(env)]
fn env_override_rejects_non_numeric_interval() {
    env::set_var(FRAME_INTERVAL_ENV, "fast");
    let result = apply_env_overrides(ResolvedConfig::default());
    env::remove_var(FRAME_INTERVAL_ENV);

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial(env)]
fn env_config_path_is_used_when_no_explicit_path() {
    let config_path = env::temp_dir().join("viewkit_test_env_config.toml");
    fs::write(&config_path, "page_size = 7\n").expect("Failed to write test config");

    env::set_var(CONFIG_ENV, &config_path);
    let loaded = load_config_with_precedence(None);
    env::remove_var(CONFIG_ENV);
    fs::remove_file(&config_path).ok();

    assert_eq!(loaded.unwrap().and_then(|c| c.page_size), Some(7));
}

#[test]
#[serial(env)]
fn explicit_path_wins_over_env() {
    env::set_var(CONFIG_ENV, "/nonexistent/env/config.toml");
    let config_path = env::temp_dir().join("viewkit_test_explicit_config.toml");
    fs::write(&config_path, "page_size = 3\n").expect("Failed to write test config");

    let loaded = load_config_with_precedence(Some(config_path.clone()));
    env::remove_var(CONFIG_ENV);
    fs::remove_file(&config_path).ok();

    assert_eq!(loaded.unwrap().and_then(|c| c.page_size), Some(3));
}

#[test]
fn cli_overrides_only_apply_when_set() {
    let base = ResolvedConfig::default();

    let unchanged = apply_cli_overrides(base.clone(), None, None, None);
    assert_eq!(unchanged, base);

    let changed = apply_cli_overrides(base, Some(16), Some(2), Some(PathBuf::from("x.log")));
    assert_eq!(changed.frame_interval_ms, 16);
    assert_eq!(changed.page_size, 2);
    assert_eq!(changed.log_file_path, PathBuf::from("x.log"));
}
