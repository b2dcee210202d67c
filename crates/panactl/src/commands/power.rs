//! Power command handlers.

use panactl_core::{Action, Coordinator};

use crate::cli::{GlobalOpts, PowerArgs, PowerCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(
    coordinator: &Coordinator,
    args: PowerArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let action = match args.command {
        PowerCommand::On => Action::PowerOn,
        PowerCommand::Off => Action::PowerOff,
        PowerCommand::Toggle => Action::TogglePower,
    };

    // On/off are skipped when the player is already there, which needs a
    // fresh state. An unanswered poll leaves the state unknown and the
    // command is sent anyway.
    if !matches!(action, Action::TogglePower) {
        let refreshed = coordinator.refresh().await;
        if let Err(e) = refreshed {
            tracing::debug!(error = %e, "pre-command refresh failed");
        }
    }

    util::run_action(coordinator, action, global).await
}
