//! Configuration file loading with precedence handling.

use crate::view_state::SurfaceConfig;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PARALLAX_SNAP_CONFIG";

/// Environment variable overriding the display width.
pub const DISPLAY_WIDTH_ENV_VAR: &str = "PARALLAX_SNAP_DISPLAY_WIDTH";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
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
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/parallax-snap/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Display width the zone thresholds derive from. Terminal width if unset.
    #[serde(default)]
    pub display_width: Option<u16>,

    /// Number of content rows below the cover image.
    #[serde(default)]
    pub content_rows: Option<u16>,

    /// Smooth scroll duration in milliseconds.
    #[serde(default)]
    pub smooth_scroll_ms: Option<u64>,

    /// Fraction of fling velocity kept per frame.
    #[serde(default)]
    pub fling_friction: Option<f64>,

    /// Minimum release speed (rows per second) that starts a fling.
    #[serde(default)]
    pub min_fling_velocity: Option<i32>,

    /// Drag distance in rows before a gesture is intercepted.
    #[serde(default)]
    pub touch_slop: Option<f32>,

    /// Rows scrolled per mouse wheel notch.
    #[serde(default)]
    pub wheel_step: Option<u16>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Fixed display width, or `None` to follow the terminal width.
    pub display_width: Option<u16>,
    /// Content rows below the image.
    pub content_rows: u16,
    /// Smooth scroll duration.
    pub smooth_scroll_ms: u64,
    /// Fling friction per frame.
    pub fling_friction: f64,
    /// Minimum fling speed.
    pub min_fling_velocity: i32,
    /// Interception slop.
    pub touch_slop: f32,
    /// Rows per wheel notch.
    pub wheel_step: u16,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let surface = SurfaceConfig::default();
        Self {
            display_width: None,
            content_rows: 200,
            smooth_scroll_ms: surface.smooth_scroll_ms,
            fling_friction: surface.fling_friction,
            min_fling_velocity: surface.min_fling_velocity,
            touch_slop: surface.touch_slop,
            wheel_step: 3,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Surface tunables carried by this config.
    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            smooth_scroll_ms: self.smooth_scroll_ms,
            fling_friction: self.fling_friction,
            min_fling_velocity: self.min_fling_velocity,
            touch_slop: self.touch_slop,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/parallax-snap/parallax-snap.log` on Linux,
/// or the platform state directory elsewhere.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("parallax-snap").join("parallax-snap.log")
    } else {
        PathBuf::from("parallax-snap.log")
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
/// Returns `~/.config/parallax-snap/config.toml` on Linux.
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("parallax-snap").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PARALLAX_SNAP_CONFIG` environment variable
/// 3. Default path
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

    if let Some(env_path) = std::env::var_os(CONFIG_ENV_VAR) {
        let env_path = PathBuf::from(env_path);
        if env_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath(format!(
                "{CONFIG_ENV_VAR} is set but empty"
            )));
        }
        return load_config_file(env_path);
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        display_width: config.display_width.or(defaults.display_width),
        content_rows: config.content_rows.unwrap_or(defaults.content_rows),
        smooth_scroll_ms: config.smooth_scroll_ms.unwrap_or(defaults.smooth_scroll_ms),
        fling_friction: config.fling_friction.unwrap_or(defaults.fling_friction),
        min_fling_velocity: config
            .min_fling_velocity
            .unwrap_or(defaults.min_fling_velocity),
        touch_slop: config.touch_slop.unwrap_or(defaults.touch_slop),
        wheel_step: config.wheel_step.unwrap_or(defaults.wheel_step),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for `PARALLAX_SNAP_DISPLAY_WIDTH`. Unparseable or zero values are
/// logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(DISPLAY_WIDTH_ENV_VAR) {
        match raw.trim().parse::<u16>() {
            Ok(width) if width > 0 => config.display_width = Some(width),
            _ => warn!(value = %raw, "Ignoring invalid {}", DISPLAY_WIDTH_ENV_VAR),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags the user actually set
/// are passed as `Some`.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    display_width_override: Option<u16>,
    content_rows_override: Option<u16>,
) -> ResolvedConfig {
    if let Some(width) = display_width_override {
        config.display_width = Some(width);
    }

    if let Some(rows) = content_rows_override {
        config.content_rows = rows;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
