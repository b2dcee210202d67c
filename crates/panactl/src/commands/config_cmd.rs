//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Confirm, Input};

use panactl_config::{self as config, Config, Profile};
use panactl_core::Coordinator;
use panactl_core::config::{DEFAULT_NAME, DEFAULT_SCAN_INTERVAL_SECS};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn describe(cfg: &Config) -> String {
    let mut out = format!(
        "Config file:     {}\nDefault profile: {}\nOutput:          {}\nTimeout:         {}s\nScan interval:   {}s",
        config::config_path().display(),
        cfg.default_profile.as_deref().unwrap_or("-"),
        cfg.defaults.output,
        cfg.defaults.timeout,
        cfg.defaults.scan_interval,
    );
    for (name, profile) in &cfg.profiles {
        let _ = write!(
            out,
            "\n\n[{name}]\n  host:          {}\n  name:          {}",
            profile.host,
            profile.name.as_deref().unwrap_or(DEFAULT_NAME),
        );
        if let Some(secs) = profile.scan_interval {
            let _ = write!(out, "\n  scan_interval: {secs}s");
        }
        if let Some(secs) = profile.timeout {
            let _ = write!(out, "\n  timeout:       {secs}s");
        }
    }
    out
}

/// Poll the new profile once and report what came back.
async fn test_connection(profile: &Profile, cfg: &Config) -> Result<(), CliError> {
    let device = config::profile_to_device_config(profile, &cfg.defaults)?;
    let coordinator = Coordinator::from_config(&device)?;
    let state = coordinator.refresh().await?;

    if state.is_unknown() {
        eprintln!("   ✗ No status from {}; the profile was saved anyway", device.host);
    } else {
        eprintln!(
            "   ✓ Player answered: {}",
            output::paint_state(state.state, false)
        );
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("panactl configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config()?;

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(config::DEFAULT_PROFILE.into())
                .interact_text()
                .map_err(prompt_err)?;

            let host: String = Input::new()
                .with_prompt("Player address (host or host:port)")
                .validate_with(|input: &String| {
                    config::validate_host(input).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let name: String = Input::new()
                .with_prompt("Display name")
                .default(DEFAULT_NAME.into())
                .interact_text()
                .map_err(prompt_err)?;

            let scan_interval: u64 = Input::new()
                .with_prompt("Poll interval (seconds)")
                .default(DEFAULT_SCAN_INTERVAL_SECS)
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile {
                host,
                name: (name != DEFAULT_NAME).then_some(name),
                scan_interval: None,
                timeout: None,
            };
            if scan_interval != cfg.defaults.scan_interval {
                config::set_profile_value(
                    &mut profile,
                    "scan_interval",
                    &scan_interval.to_string(),
                )?;
            }

            cfg.profiles.insert(profile_name.clone(), profile.clone());
            cfg.default_profile = Some(profile_name.clone());
            let path = config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");

            let check = Confirm::new()
                .with_prompt("Test the connection now?")
                .default(true)
                .interact()
                .map_err(prompt_err)?;
            if check {
                test_connection(&profile, &cfg).await?;
            } else {
                eprintln!("\n  Test it: panactl status");
            }

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(global.output, &cfg, describe, |c| {
                c.default_profile.clone().unwrap_or_default()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            let profile_name = active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            config::set_profile_value(profile, &key, &value)?;
            if profile.host.is_empty() {
                eprintln!("  Note: profile '{profile_name}' has no host yet. Run: panactl config set host <address>");
            }

            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg
                .default_profile
                .as_deref()
                .unwrap_or(config::DEFAULT_PROFILE);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: panactl config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            cfg.profile(&name)?;

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}
