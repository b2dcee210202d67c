// ── Player backend seam ──
//
// The coordinator talks to the player through this trait so polling and
// action routing can be driven by a scripted backend in tests.

use std::future::Future;
use std::time::Duration;

use panactl_api::{CommandOutcome, PlayerClient, PlayerStatus};

use crate::error::CoreError;

/// Everything the coordinator needs from a player.
pub trait PlayerBackend: Send + Sync + 'static {
    /// Read one status snapshot.
    ///
    /// `Ok(None)` means the player answered badly or not at all; `Err` is
    /// reserved for failures of the backend itself.
    fn fetch_status(&self) -> impl Future<Output = Result<Option<PlayerStatus>, CoreError>> + Send;

    /// Send one command by name.
    fn send_command(&self, command: &str) -> impl Future<Output = CommandOutcome> + Send;

    /// Send `commands` in order, `repeats` times over, sleeping `delay`
    /// after every send.
    fn send_commands(
        &self,
        commands: &[String],
        repeats: usize,
        delay: Duration,
    ) -> impl Future<Output = Vec<(String, CommandOutcome)>> + Send {
        async move {
            let mut outcomes = Vec::new();
            for _ in 0..repeats {
                for command in commands {
                    outcomes.push((command.clone(), self.send_command(command).await));
                    tokio::time::sleep(delay).await;
                }
            }
            outcomes
        }
    }
}

impl PlayerBackend for PlayerClient {
    async fn fetch_status(&self) -> Result<Option<PlayerStatus>, CoreError> {
        Ok(self.get_player_status().await)
    }

    async fn send_command(&self, command: &str) -> CommandOutcome {
        PlayerClient::send_command(self, command).await
    }

    async fn send_commands(
        &self,
        commands: &[String],
        repeats: usize,
        delay: Duration,
    ) -> Vec<(String, CommandOutcome)> {
        PlayerClient::send_commands(self, commands, repeats, delay).await
    }
}
