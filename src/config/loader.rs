//! Configuration file loading with precedence handling.

use super::ChromeTimings;
use crate::model::AccessibilityFlags;
use crate::preferences::StaticPreferences;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LECTERN_CONFIG";

/// Environment variable overriding the "always show controls" preference.
pub const ALWAYS_SHOW_ENV_VAR: &str = "LECTERN_ALWAYS_SHOW";

/// Environment variable overriding the reduce-motion accessibility flag.
pub const REDUCE_MOTION_ENV_VAR: &str = "LECTERN_REDUCE_MOTION";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Timing values are inconsistent with each other.
    #[error("Invalid timings: {0}")]
    InvalidTimings(String),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/lectern/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Never hide the reader controls.
    #[serde(default)]
    pub always_show_controls: Option<bool>,

    /// Treat reduce-motion as enabled.
    #[serde(default)]
    pub reduce_motion: Option<bool>,

    /// Treat a screen reader as running.
    #[serde(default)]
    pub screen_reader: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Timing overrides.
    #[serde(default)]
    pub timings: Option<TimingsSection>,
}

/// `[timings]` table from TOML.
///
/// Durations are in milliseconds, velocities in px/s:
/// ```toml
/// [timings]
/// default_delay_ms = 4000
/// hide_velocity = 1200.0
/// reveal_velocity = 300.0
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TimingsSection {
    /// Default auto-hide delay.
    #[serde(default)]
    pub default_delay_ms: Option<u64>,
    /// Auto-hide delay after closing settings.
    #[serde(default)]
    pub extended_delay_ms: Option<u64>,
    /// Auto-hide delay after searching.
    #[serde(default)]
    pub search_delay_ms: Option<u64>,
    /// Fast-scroll hide threshold.
    #[serde(default)]
    pub hide_velocity: Option<f64>,
    /// Slow-scroll reveal threshold.
    #[serde(default)]
    pub reveal_velocity: Option<f64>,
    /// Quiet period before a pause-reveal.
    #[serde(default)]
    pub pause_for_reveal_ms: Option<u64>,
    /// How long a velocity reveal lasts.
    #[serde(default)]
    pub reveal_duration_ms: Option<u64>,
    /// Scroll sample debounce interval.
    #[serde(default)]
    pub minimum_sample_interval_ms: Option<u64>,
    /// Recent-activity decay window.
    #[serde(default)]
    pub recent_activity_window_ms: Option<u64>,
}

impl TimingsSection {
    /// Overlay the values present in this section onto `base`.
    pub fn apply_to(&self, base: ChromeTimings) -> ChromeTimings {
        let ms = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_millis).unwrap_or(fallback)
        };

        ChromeTimings {
            default_delay: ms(self.default_delay_ms, base.default_delay),
            extended_delay: ms(self.extended_delay_ms, base.extended_delay),
            search_delay: ms(self.search_delay_ms, base.search_delay),
            velocity_threshold_for_hide: self
                .hide_velocity
                .unwrap_or(base.velocity_threshold_for_hide),
            velocity_threshold_for_reveal: self
                .reveal_velocity
                .unwrap_or(base.velocity_threshold_for_reveal),
            pause_duration_for_reveal: ms(self.pause_for_reveal_ms, base.pause_duration_for_reveal),
            velocity_reveal_duration: ms(self.reveal_duration_ms, base.velocity_reveal_duration),
            minimum_sample_interval: ms(
                self.minimum_sample_interval_ms,
                base.minimum_sample_interval,
            ),
            recent_activity_window: ms(
                self.recent_activity_window_ms,
                base.recent_activity_window,
            ),
        }
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Always show the reader controls.
    pub always_show_controls: bool,
    /// Reduce-motion accessibility flag.
    pub reduce_motion: bool,
    /// Screen-reader accessibility flag.
    pub screen_reader: bool,
    /// Controller timings.
    pub timings: ChromeTimings,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            always_show_controls: false,
            reduce_motion: false,
            screen_reader: false,
            timings: ChromeTimings::default(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Initial preference values for the controller.
    pub fn preferences(&self) -> StaticPreferences {
        StaticPreferences {
            always_show_controls: self.always_show_controls,
            accessibility: AccessibilityFlags {
                reduce_motion: self.reduce_motion,
                screen_reader: self.screen_reader,
            },
        }
    }

    /// Validate the resolved timings.
    ///
    /// # Errors
    ///
    /// See [`ChromeTimings::validate`].
    pub fn validate(self) -> Result<Self, ConfigError> {
        self.timings.validate()?;
        Ok(self)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/lectern/lectern.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("lectern").join("lectern.log")
    } else {
        PathBuf::from("lectern.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/lectern/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lectern").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LECTERN_CONFIG` environment variable
/// 3. Default path `~/.config/lectern/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Interpret an environment flag value.
///
/// Accepts `1/true/yes/on` and `0/false/no/off` (case-insensitive); anything
/// else is ignored.
fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LECTERN_ALWAYS_SHOW`: override `always_show_controls`
/// - `LECTERN_REDUCE_MOTION`: override `reduce_motion`
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(flag) = std::env::var(ALWAYS_SHOW_ENV_VAR)
        .ok()
        .as_deref()
        .and_then(parse_env_flag)
    {
        config.always_show_controls = flag;
    }

    if let Some(flag) = std::env::var(REDUCE_MOTION_ENV_VAR)
        .ok()
        .as_deref()
        .and_then(parse_env_flag)
    {
        config.reduce_motion = flag;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let timings = match &config.timings {
        Some(section) => section.apply_to(defaults.timings),
        None => defaults.timings,
    };

    ResolvedConfig {
        always_show_controls: config
            .always_show_controls
            .unwrap_or(defaults.always_show_controls),
        reduce_motion: config.reduce_motion.unwrap_or(defaults.reduce_motion),
        screen_reader: config.screen_reader.unwrap_or(defaults.screen_reader),
        timings,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    always_show_override: Option<bool>,
    reduce_motion_override: Option<bool>,
    log_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(always_show) = always_show_override {
        config.always_show_controls = always_show;
    }

    if let Some(reduce_motion) = reduce_motion_override {
        config.reduce_motion = reduce_motion;
    }

    if let Some(path) = log_file_override {
        config.log_file_path = path;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
