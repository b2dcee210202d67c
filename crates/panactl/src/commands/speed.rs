//! Speed command handlers.

use serde::Serialize;
use tabled::Tabled;

use panactl_core::{Action, Coordinator, SpeedOption, speed_label};

use crate::cli::{GlobalOpts, SpeedArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SpeedRow {
    #[tabled(rename = "Speed")]
    label: String,
    #[tabled(rename = "Command")]
    command: &'static str,
    #[tabled(rename = "Multiplier")]
    multiplier: i64,
}

#[derive(Serialize)]
struct SpeedEntry {
    label: String,
    command: &'static str,
    multiplier: i64,
}

impl From<SpeedOption> for SpeedEntry {
    fn from(option: SpeedOption) -> Self {
        Self {
            label: option.to_string(),
            command: option.command(),
            multiplier: option.multiplier(),
        }
    }
}

/// The speed the player reports, and the selectable option shown for it.
#[derive(Serialize)]
struct CurrentSpeed {
    multiplier: i64,
    label: String,
    selected: String,
}

// ── Handlers ────────────────────────────────────────────────────────

/// Print the selectable speeds in display order.
pub fn list(global: &GlobalOpts) -> Result<(), CliError> {
    let entries: Vec<SpeedEntry> = SpeedOption::all().map(SpeedEntry::from).collect();

    let out = output::render_list(
        global.output,
        &entries,
        |e| SpeedRow {
            label: e.label.clone(),
            command: e.command,
            multiplier: e.multiplier,
        },
        |e| e.label.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    coordinator: &Coordinator,
    args: SpeedArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.option {
        Some(label) => {
            let option = parse_option(&label)?;
            util::run_action(coordinator, Action::SetSpeed(option), global).await
        }
        None => current(coordinator, global).await,
    }
}

fn parse_option(label: &str) -> Result<SpeedOption, CliError> {
    SpeedOption::from_label(label).ok_or_else(|| CliError::Validation {
        field: "speed".into(),
        reason: format!(
            "unknown speed '{label}'. Options: {}",
            SpeedOption::labels().join(", ")
        ),
    })
}

async fn current(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    let state = util::refresh_required(coordinator).await?;
    let report = CurrentSpeed {
        multiplier: state.speed_multiplier,
        label: speed_label(state.speed_multiplier),
        selected: SpeedOption::current_option(state.speed_multiplier).to_string(),
    };

    let out = output::render_single(
        global.output,
        &report,
        |r| {
            format!(
                "Speed:     {} (multiplier {})\nSelected:  {}",
                r.label, r.multiplier, r.selected
            )
        },
        |r| r.label.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_labels_are_lenient() {
        assert_eq!(parse_option("ff3").ok(), Some(SpeedOption::Ff3));
        assert_eq!(parse_option("REW 5").ok(), Some(SpeedOption::Rew5));
        assert_eq!(parse_option("normal").ok(), Some(SpeedOption::Normal));
    }

    #[test]
    fn unknown_option_lists_choices() {
        let Err(CliError::Validation { reason, .. }) = parse_option("warp 9") else {
            panic!("expected a validation error");
        };
        assert!(reason.contains("REW 5"));
        assert!(reason.contains("FF 5"));
    }
}
