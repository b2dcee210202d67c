//! Shared helpers for command handlers.

use tabled::Tabled;

use panactl_core::{Action, ActionResult, Coordinator, SentCommand, command};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SentRow {
    #[tabled(rename = "Command")]
    command: String,
    #[tabled(rename = "Token")]
    token: String,
    #[tabled(rename = "Result")]
    result: &'static str,
    #[tabled(rename = "Code")]
    code: String,
}

impl From<&SentCommand> for SentRow {
    fn from(sent: &SentCommand) -> Self {
        Self {
            command: sent.command.clone(),
            token: command::resolve(&sent.command),
            result: if sent.outcome.success { "ok" } else { "rejected" },
            code: sent.outcome.response_code.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

// ── Action execution ────────────────────────────────────────────────

/// Execute `action`, report what happened, and turn a rejected command
/// into an error.
pub async fn run_action(
    coordinator: &Coordinator,
    action: Action,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = coordinator.execute(action).await?;
    report(&result, global)?;
    check(&result)
}

/// Print an action result. Table and plain output go to stderr as short
/// confirmations; sequences get a table. Structured formats render the
/// whole result to stdout.
fn report(result: &ActionResult, global: &GlobalOpts) -> Result<(), CliError> {
    match (global.output, result) {
        (OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml, _) => {
            let out = output::render_single(
                global.output,
                result,
                |_| String::new(),
                |_| String::new(),
            )?;
            output::print_output(&out, global.quiet);
        }
        (_, ActionResult::Sequence { outcomes }) => {
            let out = output::render_list(global.output, outcomes, |s| SentRow::from(s), |s| {
                format!(
                    "{} {}",
                    s.command,
                    s.outcome.response_code.as_deref().unwrap_or("-")
                )
            })?;
            output::print_output(&out, global.quiet);
        }
        (_, ActionResult::Sent { command, outcome }) => {
            if outcome.success && !global.quiet {
                eprintln!("✓ Sent {command}");
            }
        }
        (_, ActionResult::Skipped { reason }) => {
            if !global.quiet {
                eprintln!("Skipped: {reason}");
            }
        }
    }
    Ok(())
}

fn check(result: &ActionResult) -> Result<(), CliError> {
    match result.first_failure() {
        Some((command, code)) => Err(CliError::CommandRejected {
            command: command.to_owned(),
            code: code.map_or_else(|| "no response".into(), |c| format!("\"{c}\"")),
        }),
        None => Ok(()),
    }
}

/// Refresh once and require a status, so read-only commands fail loudly
/// when the player does not answer.
pub async fn refresh_required(
    coordinator: &Coordinator,
) -> Result<std::sync::Arc<panactl_core::PlayerState>, CliError> {
    let state = coordinator.refresh().await?;
    if state.is_unknown() {
        return Err(CliError::PlayerUnavailable {
            host: coordinator.backend().host().to_owned(),
        });
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use panactl_core::CommandOutcome;

    use super::*;

    fn sent(command: &str, success: bool, code: Option<&str>) -> ActionResult {
        ActionResult::Sent {
            command: command.into(),
            outcome: CommandOutcome {
                success,
                response_code: code.map(Into::into),
            },
        }
    }

    #[test]
    fn rejected_command_becomes_error() {
        let err = check(&sent("ZOOM", false, Some("02"))).unwrap_err();
        assert!(matches!(
            err,
            CliError::CommandRejected { ref command, ref code } if command == "ZOOM" && code == "\"02\""
        ));

        let err = check(&sent("STOP", false, None)).unwrap_err();
        assert!(matches!(err, CliError::CommandRejected { ref code, .. } if code == "no response"));

        assert!(check(&sent("STOP", true, Some("00"))).is_ok());
    }

    #[test]
    fn sequence_report_renders_every_format() {
        use clap::Parser;

        let result = ActionResult::Sequence {
            outcomes: vec![SentCommand {
                command: "up".into(),
                outcome: CommandOutcome {
                    success: true,
                    response_code: Some("00".into()),
                },
            }],
        };
        for format in ["table", "plain", "json"] {
            let mut global =
                crate::cli::Cli::try_parse_from(["panactl", "-q", "-o", format, "commands"])
                    .unwrap()
                    .global;
            global.output = global.output_flag.unwrap();
            assert!(report(&result, &global).is_ok(), "{format}");
        }
    }

    #[test]
    fn sent_row_shows_resolved_token() {
        let row = SentRow::from(&SentCommand {
            command: "ok".into(),
            outcome: CommandOutcome {
                success: true,
                response_code: Some("00".into()),
            },
        });
        assert_eq!(row.token, "cCMD_RC_SELECT");
        assert_eq!(row.result, "ok");
    }
}
