//! Shared configuration for panactl.
//!
//! TOML profiles, environment overrides, and translation to
//! `panactl_core::DeviceConfig`. The CLI layers its global flags on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use panactl_core::DeviceConfig;
use panactl_core::config::{
    DEFAULT_NAME, DEFAULT_SCAN_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, MAX_SCAN_INTERVAL_SECS,
    MIN_SCAN_INTERVAL_SECS,
};

/// Prefix of environment variables merged over the config file.
pub const ENV_PREFIX: &str = "PANACTL_";

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "PANACTL_CONFIG";

/// Profile used when nothing else selects one.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named player profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Poll interval in seconds.
    #[serde(default = "default_scan_interval")]
    pub scan_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            scan_interval: default_scan_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_scan_interval() -> u64 {
    DEFAULT_SCAN_INTERVAL_SECS
}

/// A named player profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Player address: `host` or `host:port`, no scheme.
    pub host: String,

    /// Display name.
    pub name: Option<String>,

    /// Override poll interval (seconds).
    pub scan_interval: Option<u64>,

    /// Override request timeout (seconds).
    pub timeout: Option<u64>,
}

impl Config {
    /// Resolve the active profile name: explicit request, then the
    /// configured default, then `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.into())
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.available_profiles(),
            })
    }

    /// Comma-separated profile names, or `(none)`.
    pub fn available_profiles(&self) -> String {
        if self.profiles.is_empty() {
            "(none)".into()
        } else {
            self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `PANACTL_CONFIG`, then the platform
/// config directory.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "panactl", "panactl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("panactl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`, layering defaults, the TOML file (if present), and
/// `PANACTL_*` variables. Nested keys use a double underscore:
/// `PANACTL_PROFILES__LIVING__HOST`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it can't be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Validation ──────────────────────────────────────────────────────

/// Check that `host` is a bare `host` or `host:port`.
pub fn validate_host(host: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::Validation {
        field: "host".into(),
        reason: reason.into(),
    };

    if host.trim().is_empty() {
        return Err(invalid("host must not be empty"));
    }
    if host.contains("://") {
        return Err(invalid("use a bare address such as 192.168.1.40, without http://"));
    }
    if host
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
    {
        return Err(invalid("expected `host` or `host:port`"));
    }
    if let Some((name, port)) = host.split_once(':') {
        if !host.starts_with('[') {
            if name.is_empty() {
                return Err(invalid("missing host before port"));
            }
            if port.parse::<u16>().map_or(true, |p| p == 0) {
                return Err(invalid(&format!("invalid port '{port}'")));
            }
        }
    }
    Ok(())
}

fn validate_scan_interval(secs: u64) -> Result<(), ConfigError> {
    if (MIN_SCAN_INTERVAL_SECS..=MAX_SCAN_INTERVAL_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: "scan_interval".into(),
            reason: format!(
                "must be between {MIN_SCAN_INTERVAL_SECS} and {MAX_SCAN_INTERVAL_SECS} seconds, got {secs}"
            ),
        })
    }
}

fn validate_timeout(secs: u64) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Validation {
            field: "timeout".into(),
            reason: "must be at least 1 second".into(),
        });
    }
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `DeviceConfig` from a profile, filling gaps from `defaults`.
pub fn profile_to_device_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<DeviceConfig, ConfigError> {
    validate_host(&profile.host)?;

    let scan_interval = profile.scan_interval.unwrap_or(defaults.scan_interval);
    validate_scan_interval(scan_interval)?;

    let timeout = profile.timeout.unwrap_or(defaults.timeout);
    validate_timeout(timeout)?;

    Ok(DeviceConfig {
        host: profile.host.clone(),
        name: profile.name.clone().unwrap_or_else(|| DEFAULT_NAME.into()),
        scan_interval: Duration::from_secs(scan_interval),
        timeout: Duration::from_secs(timeout),
    })
}

/// Apply `key = value` to a profile. Keys: `host`, `name`,
/// `scan_interval`, `timeout` (dashes accepted in place of underscores).
pub fn set_profile_value(profile: &mut Profile, key: &str, value: &str) -> Result<(), ConfigError> {
    let number = |field: &str| {
        value.parse::<u64>().map_err(|_| ConfigError::Validation {
            field: field.into(),
            reason: "must be a whole number of seconds".into(),
        })
    };

    match key.replace('-', "_").as_str() {
        "host" => {
            validate_host(value)?;
            profile.host = value.into();
        }
        "name" => profile.name = Some(value.into()),
        "scan_interval" => {
            let secs = number("scan_interval")?;
            validate_scan_interval(secs)?;
            profile.scan_interval = Some(secs);
        }
        "timeout" => {
            let secs = number("timeout")?;
            validate_timeout(secs)?;
            profile.timeout = Some(secs);
        }
        other => {
            return Err(ConfigError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: host, name, scan_interval, timeout"
                ),
            });
        }
    }
    Ok(())
}
