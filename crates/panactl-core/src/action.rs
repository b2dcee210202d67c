// ── Action API ──
//
// Every write operation flows through a unified `Action` enum. The
// coordinator routes each variant to one or more player commands.

use std::time::Duration;

use serde::Serialize;

use panactl_api::CommandOutcome;

use crate::projection::SpeedOption;

/// Upper bound on `Action::Send` repeats.
pub const MAX_REPEATS: usize = 100;

/// All operations that change the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Power ────────────────────────────────────────────────────────
    PowerOn,
    PowerOff,
    TogglePower,

    // ── Transport ────────────────────────────────────────────────────
    Play,
    Pause,
    Stop,
    NextTrack,
    PreviousTrack,
    SetSpeed(SpeedOption),

    // ── Tray ─────────────────────────────────────────────────────────
    OpenTray,
    CloseTray,
    ToggleTray,

    // ── Raw remote commands ──────────────────────────────────────────
    Send {
        commands: Vec<String>,
        repeats: usize,
        delay: Duration,
    },
}

impl Action {
    /// The command name for single-command actions; `None` for `Send`.
    pub fn command(&self) -> Option<&'static str> {
        let name = match self {
            Self::PowerOn => "POWERON",
            Self::PowerOff => "POWEROFF",
            Self::TogglePower => "POWER",
            Self::Play => "PLAYBACK",
            Self::Pause => "PAUSE",
            Self::Stop => "STOP",
            Self::NextTrack => "SKIPFWD",
            Self::PreviousTrack => "SKIPREV",
            Self::SetSpeed(option) => option.command(),
            Self::OpenTray => "TRAYOPEN",
            Self::CloseTray => "TRAYCLOSE",
            Self::ToggleTray => "OP_CL",
            Self::Send { .. } => return None,
        };
        Some(name)
    }
}

/// What executing an action did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActionResult {
    /// One command was sent.
    Sent {
        command: String,
        #[serde(flatten)]
        outcome: CommandOutcome,
    },
    /// A command sequence was sent; outcomes are in send order.
    Sequence { outcomes: Vec<SentCommand> },
    /// Nothing was sent because the player is already in the target state.
    Skipped { reason: String },
}

/// One entry of a command sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentCommand {
    pub command: String,
    #[serde(flatten)]
    pub outcome: CommandOutcome,
}

impl ActionResult {
    /// `true` unless some command was rejected or lost.
    pub fn is_success(&self) -> bool {
        self.first_failure().is_none()
    }

    /// The first command that did not succeed, with its response code.
    pub fn first_failure(&self) -> Option<(&str, Option<&str>)> {
        match self {
            Self::Sent { command, outcome } if !outcome.success => {
                Some((command.as_str(), outcome.response_code.as_deref()))
            }
            Self::Sequence { outcomes } => outcomes
                .iter()
                .find(|sent| !sent.outcome.success)
                .map(|sent| (sent.command.as_str(), sent.outcome.response_code.as_deref())),
            Self::Sent { .. } | Self::Skipped { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn outcome(success: bool, code: &str) -> CommandOutcome {
        CommandOutcome {
            success,
            response_code: Some(code.into()),
        }
    }

    #[test]
    fn single_command_names() {
        assert_eq!(Action::Play.command(), Some("PLAYBACK"));
        assert_eq!(Action::ToggleTray.command(), Some("OP_CL"));
        assert_eq!(Action::SetSpeed(SpeedOption::Rew2).command(), Some("SEARCH_REV2"));
        let send = Action::Send {
            commands: vec!["UP".into()],
            repeats: 1,
            delay: Duration::ZERO,
        };
        assert_eq!(send.command(), None);
    }

    #[test]
    fn failure_reporting() {
        let ok = ActionResult::Sent {
            command: "STOP".into(),
            outcome: outcome(true, "00"),
        };
        assert!(ok.is_success());

        let seq = ActionResult::Sequence {
            outcomes: vec![
                SentCommand {
                    command: "UP".into(),
                    outcome: outcome(true, "00"),
                },
                SentCommand {
                    command: "ZOOM".into(),
                    outcome: outcome(false, "02"),
                },
            ],
        };
        assert_eq!(seq.first_failure(), Some(("ZOOM", Some("02"))));

        let skipped = ActionResult::Skipped {
            reason: "already off".into(),
        };
        assert!(skipped.is_success());
    }
}
