// Player client
//
// Composes the command table, the transport, and the status decoder into
// the operations callers use. Nothing here returns an error after
// construction: command failures surface as `success = false`, and status
// failures as `None`.

use std::time::Duration;

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::debug;

use crate::command;
use crate::error::Error;
use crate::status::{PlaybackState, PlayerStatus};
use crate::transport::{Transport, TransportConfig};

/// Result of sending one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub success: bool,
    /// Absent when the request never produced a response.
    pub response_code: Option<String>,
}

// ── Compatibility play status ────────────────────────────────────────

/// Coarse play state of the `(state, position, duration)` summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlayStatusKind {
    Error,
    Standby,
    Stopped,
    Playing,
    Paused,
    Off,
}

/// The `(state, position, duration)` summary older remote integrations
/// consume. Duration is never reported by the player and is always 0,
/// or -1 together with the position when the status query failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayStatus {
    pub state: PlayStatusKind,
    pub position: i64,
    pub duration: i64,
}

impl PlayStatus {
    /// Summarize a status snapshot (or its absence).
    pub fn from_status(status: Option<&PlayerStatus>) -> Self {
        let Some(status) = status else {
            return Self {
                state: PlayStatusKind::Error,
                position: -1,
                duration: -1,
            };
        };

        if !status.is_on {
            return Self {
                state: PlayStatusKind::Standby,
                position: 0,
                duration: 0,
            };
        }

        let state = match status.playback_state {
            PlaybackState::Stopped => PlayStatusKind::Stopped,
            PlaybackState::Playing
            | PlaybackState::FastForward
            | PlaybackState::Rewind
            | PlaybackState::SlowMotion => PlayStatusKind::Playing,
            PlaybackState::Paused => PlayStatusKind::Paused,
            PlaybackState::Unknown => PlayStatusKind::Off,
        };

        Self {
            state,
            position: i64::try_from(status.position_seconds).unwrap_or(i64::MAX),
            duration: 0,
        }
    }
}

// ── PlayerClient ─────────────────────────────────────────────────────

/// Client for one Panasonic Blu-ray player.
#[derive(Debug, Clone)]
pub struct PlayerClient {
    transport: Transport,
}

impl PlayerClient {
    /// Create a client for `host` (`host` or `host:port`).
    pub fn new(host: &str, config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::new(host, config)?,
        })
    }

    /// Create a client around an existing transport.
    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// The configured host.
    pub fn host(&self) -> &str {
        self.transport.host()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Resolve `command` through the command table and send it.
    pub async fn send_command(&self, command: &str) -> CommandOutcome {
        let token = command::resolve(command);
        let resp = self.transport.post(&command::command_body(&token)).await;

        debug!(
            command,
            token = %token,
            success = resp.success,
            code = resp.response_code.as_deref().unwrap_or("-"),
            "command sent"
        );

        CommandOutcome {
            success: resp.success,
            response_code: resp.response_code,
        }
    }

    /// Send `commands` in order, `repeats` times over, sleeping `delay`
    /// after every single send. Every outcome is returned in send order;
    /// a failed command does not stop the sequence.
    pub async fn send_commands<S: AsRef<str>>(
        &self,
        commands: &[S],
        repeats: usize,
        delay: Duration,
    ) -> Vec<(String, CommandOutcome)> {
        let mut outcomes = Vec::new();
        for _ in 0..repeats {
            for command in commands {
                let command = command.as_ref();
                let outcome = self.send_command(command).await;
                outcomes.push((command.to_owned(), outcome));
                tokio::time::sleep(delay).await;
            }
        }
        outcomes
    }

    async fn send(&self, command: &str) -> bool {
        self.send_command(command).await.success
    }

    pub async fn power_on(&self) -> bool {
        self.send("POWERON").await
    }

    pub async fn power_off(&self) -> bool {
        self.send("POWEROFF").await
    }

    pub async fn toggle_power(&self) -> bool {
        self.send("POWER").await
    }

    pub async fn play(&self) -> bool {
        self.send("PLAYBACK").await
    }

    pub async fn pause(&self) -> bool {
        self.send("PAUSE").await
    }

    pub async fn stop(&self) -> bool {
        self.send("STOP").await
    }

    pub async fn next_track(&self) -> bool {
        self.send("SKIPFWD").await
    }

    pub async fn previous_track(&self) -> bool {
        self.send("SKIPREV").await
    }

    pub async fn open_tray(&self) -> bool {
        self.send("TRAYOPEN").await
    }

    pub async fn close_tray(&self) -> bool {
        self.send("TRAYCLOSE").await
    }

    pub async fn toggle_tray(&self) -> bool {
        self.send("OP_CL").await
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Query `PST` then `STATUS_SIMPLE` and combine them.
    ///
    /// Returns `None` if either query fails or carries no data line. A
    /// partially filled status is never returned.
    pub async fn get_player_status(&self) -> Option<PlayerStatus> {
        let pst = self
            .transport
            .post(&command::command_body(command::PST_TOKEN))
            .await;
        let simple = self
            .transport
            .post(&command::command_body(command::STATUS_SIMPLE_TOKEN))
            .await;

        if !pst.success || !simple.success {
            debug!(
                pst = pst.success,
                status_simple = simple.success,
                "status query failed"
            );
            return None;
        }

        let (Some(pst_line), Some(status_line)) = (pst.first_line(), simple.first_line()) else {
            debug!("status query returned no data");
            return None;
        };

        Some(PlayerStatus::from_lines(pst_line, status_line))
    }

    /// Whether the tray is open; `None` if the status is unavailable.
    pub async fn is_tray_open(&self) -> Option<bool> {
        self.get_player_status()
            .await
            .map(|status| status.tray_open())
    }

    /// The `(state, position, duration)` compatibility summary.
    pub async fn play_status(&self) -> PlayStatus {
        PlayStatus::from_status(self.get_player_status().await.as_ref())
    }
}
