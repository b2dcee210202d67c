//! Resolves the player to talk to from the config file, the active
//! profile, and global flag overrides.

use clap::ValueEnum;

use panactl_config::{Config, Profile};
use panactl_core::DeviceConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// `--output` when given, else `defaults.output` from the config.
/// An unrecognized config value falls back to a table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global.output_flag.unwrap_or_else(|| {
        OutputFormat::from_str(&config.defaults.output, true).unwrap_or_else(|_| {
            tracing::warn!(
                value = %config.defaults.output,
                "unknown defaults.output in config, using table"
            );
            OutputFormat::Table
        })
    })
}

/// Build a `DeviceConfig` from `config` with `--host` / `--timeout`
/// applied on top.
///
/// An explicitly requested profile must exist. Without a matching
/// profile, `--host` alone is enough.
pub fn resolve_device(global: &GlobalOpts, config: &Config) -> Result<DeviceConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: config.available_profiles(),
            });
        }
        None => {
            let host = global.host.clone().ok_or_else(|| CliError::NoConfig {
                path: panactl_config::config_path().display().to_string(),
            })?;
            Profile {
                host,
                ..Profile::default()
            }
        }
    };

    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }

    tracing::debug!(profile = %profile_name, host = %profile.host, "resolved player");
    Ok(panactl_config::profile_to_device_config(
        &profile,
        &config.defaults,
    )?)
}
