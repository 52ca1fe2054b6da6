//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
fn default_config_path_contains_lectern_config_toml() {
    let Some(path) = default_config_path() else {
        return; // No config dir on this platform
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("lectern") && path_str.ends_with("config.toml"),
        "Path should contain 'lectern' and end with 'config.toml', got: {}",
        path_str
    );
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
    let config_path = env::temp_dir().join("lectern_test_config.toml");

    let toml_content = r#"
always_show_controls = true
reduce_motion = false
screen_reader = true

[timings]
default_delay_ms = 2500
search_delay_ms = 12000
hide_velocity = 900.0
reveal_velocity = 150.0
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.always_show_controls, Some(true));
    assert_eq!(config.reduce_motion, Some(false));
    assert_eq!(config.screen_reader, Some(true));

    let timings = config.timings.expect("timings table present");
    assert_eq!(timings.default_delay_ms, Some(2500));
    assert_eq!(timings.search_delay_ms, Some(12000));
    assert_eq!(timings.hide_velocity, Some(900.0));
    assert_eq!(timings.reveal_velocity, Some(150.0));
    assert_eq!(timings.extended_delay_ms, None);

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("lectern_test_invalid.toml");
    fs::write(&config_path, "always_show_controls = [not toml").expect("write");

    let result = load_config_file(&config_path);
    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should produce ParseError, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown top-level field should be rejected");

    let result: Result<ConfigFile, _> = toml::from_str("[timings]\nblink_ms = 3");
    assert!(result.is_err(), "Unknown timings field should be rejected");
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overlays_timings_onto_defaults() {
    let config_file = ConfigFile {
        timings: Some(TimingsSection {
            pause_for_reveal_ms: Some(750),
            reveal_velocity: Some(120.0),
            ..Default::default()
        }),
        ..Default::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ChromeTimings::default();

    assert_eq!(
        resolved.timings.pause_duration_for_reveal,
        Duration::from_millis(750)
    );
    assert_eq!(resolved.timings.velocity_threshold_for_reveal, 120.0);
    assert_eq!(resolved.timings.default_delay, defaults.default_delay);
    assert_eq!(
        resolved.timings.velocity_threshold_for_hide,
        defaults.velocity_threshold_for_hide
    );
}

#[test]
fn merge_config_overrides_preferences() {
    let config_file = ConfigFile {
        always_show_controls: Some(true),
        screen_reader: Some(true),
        ..Default::default()
    };

    let resolved = merge_config(Some(config_file));
    assert!(resolved.always_show_controls);
    assert!(resolved.screen_reader);
    assert!(!resolved.reduce_motion);

    let prefs = resolved.preferences();
    assert!(prefs.always_show_controls);
    assert!(prefs.accessibility.forces_visible());
}

#[test]
fn validate_rejects_inverted_thresholds_from_file() {
    let config_file = ConfigFile {
        timings: Some(TimingsSection {
            hide_velocity: Some(100.0),
            reveal_velocity: Some(500.0),
            ..Default::default()
        }),
        ..Default::default()
    };

    let result = merge_config(Some(config_file)).validate();
    assert!(matches!(result, Err(ConfigError::InvalidTimings(_))));
}

#[test]
fn parse_env_flag_accepts_common_spellings() {
    assert_eq!(parse_env_flag("1"), Some(true));
    assert_eq!(parse_env_flag("TRUE"), Some(true));
    assert_eq!(parse_env_flag(" yes "), Some(true));
    assert_eq!(parse_env_flag("off"), Some(false));
    assert_eq!(parse_env_flag("0"), Some(false));
    assert_eq!(parse_env_flag("maybe"), None);
}

#[test]
#[serial(lectern_env)]
fn apply_env_overrides_respects_always_show() {
    let _guard = EnvGuard::new(ALWAYS_SHOW_ENV_VAR);
    env::set_var(ALWAYS_SHOW_ENV_VAR, "1");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert!(
        result.always_show_controls,
        "LECTERN_ALWAYS_SHOW should override always_show_controls"
    );
}

#[test]
#[serial(lectern_env)]
fn apply_env_overrides_respects_reduce_motion() {
    let _guard = EnvGuard::new(REDUCE_MOTION_ENV_VAR);
    env::set_var(REDUCE_MOTION_ENV_VAR, "true");

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert!(result.reduce_motion);
    assert_eq!(result.always_show_controls, base.always_show_controls);
    assert_eq!(result.timings, base.timings);
}

#[test]
#[serial(lectern_env)]
fn apply_env_overrides_ignores_garbage_values() {
    let _guard = EnvGuard::new(ALWAYS_SHOW_ENV_VAR);
    env::set_var(ALWAYS_SHOW_ENV_VAR, "sometimes");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(lectern_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _always = EnvGuard::new(ALWAYS_SHOW_ENV_VAR);
    let _motion = EnvGuard::new(REDUCE_MOTION_ENV_VAR);

    let base = ResolvedConfig::default();
    assert_eq!(
        apply_env_overrides(base.clone()),
        base,
        "Config should be unchanged when no LECTERN_* vars are set"
    );
}

#[test]
fn apply_cli_overrides_only_touches_set_flags() {
    let base = ResolvedConfig::default();

    let unchanged = apply_cli_overrides(base.clone(), None, None, None);
    assert_eq!(unchanged, base);

    let log = PathBuf::from("/tmp/lectern-cli.log");
    let changed = apply_cli_overrides(base, Some(true), Some(true), Some(log.clone()));
    assert!(changed.always_show_controls);
    assert!(changed.reduce_motion);
    assert_eq!(changed.log_file_path, log);
}

#[test]
#[serial(lectern_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let temp_dir = env::temp_dir();
    let explicit_path = temp_dir.join("lectern_explicit.toml");
    let env_path = temp_dir.join("lectern_env.toml");
    fs::write(&explicit_path, "always_show_controls = true").expect("write explicit");
    fs::write(&env_path, "always_show_controls = false").expect("write env");

    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("load")
        .expect("explicit file exists");
    assert_eq!(config.always_show_controls, Some(true));

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(lectern_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);

    let env_path = env::temp_dir().join("lectern_env_only.toml");
    fs::write(&env_path, "reduce_motion = true").expect("write env");
    env::set_var(CONFIG_ENV_VAR, &env_path);

    let config = load_config_with_precedence(None)
        .expect("load")
        .expect("env file exists");
    assert_eq!(config.reduce_motion, Some(true));

    fs::remove_file(env_path).ok();
}
