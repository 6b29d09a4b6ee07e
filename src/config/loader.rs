//! Configuration file loading with precedence handling.

use crate::config::buttons::{ButtonMap, UnknownAction};
use crate::engine::format::DEFAULT_PRECISION;
use crate::model::AngleMode;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCICAL_CONFIG";

/// Environment variable overriding the angle mode.
pub const ANGLE_MODE_ENV: &str = "SCICAL_ANGLE_MODE";

/// Accepted range for `precision`.
pub const PRECISION_RANGE: std::ops::RangeInclusive<usize> = 1..=15;

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

    /// A setting parsed but its value is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A `[buttons]` entry names an unknown action.
    #[error(transparent)]
    UnknownAction(#[from] UnknownAction),
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/scical/config.toml`:
///
/// ```toml
/// angle_mode = "deg"
/// precision = 8
/// group_digits = true
///
/// [buttons]
/// EXE = "evaluate"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Angle mode at startup (`"rad"` or `"deg"`).
    #[serde(default)]
    pub angle_mode: Option<AngleMode>,

    /// Decimal places for non-integral results.
    #[serde(default)]
    pub precision: Option<usize>,

    /// Show thousands separators in results.
    #[serde(default)]
    pub group_digits: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Button label overrides: `label = "action-name"`.
    #[serde(default)]
    pub buttons: Option<HashMap<String, String>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Angle mode at startup.
    pub angle_mode: AngleMode,
    /// Decimal places for non-integral results.
    pub precision: usize,
    /// Thousands separators in displayed results.
    pub group_digits: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Button label to action table.
    pub buttons: ButtonMap,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Rad,
            precision: DEFAULT_PRECISION,
            group_digits: false,
            log_file_path: default_log_path(),
            buttons: ButtonMap::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/scical/scical.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("scical").join("scical.log")
    } else {
        PathBuf::from("scical.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
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
/// Returns `~/.config/scical/config.toml` on Unix, appropriate path on other
/// platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scical").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SCICAL_CONFIG` environment variable
/// 3. Default path `~/.config/scical/config.toml`
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

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.trim().is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use
/// default. Button overrides are applied on top of the default layout.
///
/// # Errors
///
/// Returns `InvalidValue` for a precision outside 1..=15 and
/// `UnknownAction` for a button override naming no action.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let precision = config.precision.unwrap_or(defaults.precision);
    if !PRECISION_RANGE.contains(&precision) {
        return Err(ConfigError::InvalidValue {
            field: "precision",
            reason: format!(
                "{precision} is outside {}..={}",
                PRECISION_RANGE.start(),
                PRECISION_RANGE.end()
            ),
        });
    }

    let buttons = match &config.buttons {
        Some(overrides) => defaults.buttons.with_overrides(overrides)?,
        None => defaults.buttons,
    };

    Ok(ResolvedConfig {
        angle_mode: config.angle_mode.unwrap_or(defaults.angle_mode),
        precision,
        group_digits: config.group_digits.unwrap_or(defaults.group_digits),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        buttons,
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SCICAL_ANGLE_MODE`: Override angle mode
///
/// # Errors
///
/// Returns `InvalidValue` if the variable is set to an unknown mode.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(mode) = std::env::var(ANGLE_MODE_ENV) {
        config.angle_mode = mode.parse().map_err(|e: crate::model::InvalidAngleMode| {
            ConfigError::InvalidValue {
                field: ANGLE_MODE_ENV,
                reason: e.to_string(),
            }
        })?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    angle_mode_override: Option<AngleMode>,
) -> ResolvedConfig {
    if let Some(mode) = angle_mode_override {
        config.angle_mode = mode;
    }

    config
}

/// Run the whole precedence chain.
///
/// # Errors
///
/// Propagates the first failure from loading, merging or env overrides.
pub fn resolve(
    config_path: Option<PathBuf>,
    angle_mode_override: Option<AngleMode>,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = merge_config(file)?;
    let with_env = apply_env_overrides(merged)?;
    Ok(apply_cli_overrides(with_env, angle_mode_override))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
