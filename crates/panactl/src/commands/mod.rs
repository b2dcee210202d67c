//! Command dispatch: bridges CLI args -> core Actions -> output formatting.

pub mod commands_list;
pub mod config_cmd;
pub mod playback;
pub mod power;
pub mod send;
pub mod speed;
pub mod status;
pub mod tray;
pub mod util;
pub mod watch;

use panactl_core::{Action, Coordinator};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a player-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    coordinator: &Coordinator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(coordinator, global).await,
        Command::Send(args) => send::handle(coordinator, args, global).await,
        Command::Power(args) => power::handle(coordinator, args, global).await,
        Command::Tray(args) => tray::handle(coordinator, args, global).await,
        Command::Play => playback::handle(coordinator, Action::Play, global).await,
        Command::Pause => playback::handle(coordinator, Action::Pause, global).await,
        Command::Stop => playback::handle(coordinator, Action::Stop, global).await,
        Command::Next => playback::handle(coordinator, Action::NextTrack, global).await,
        Command::Prev => playback::handle(coordinator, Action::PreviousTrack, global).await,
        Command::Speed(args) => speed::handle(coordinator, args, global).await,
        Command::Watch(args) => watch::handle(coordinator, args, global).await,
        // Handled before a coordinator is built
        Command::Commands | Command::Config(_) | Command::Completions(_) => Err(CliError::Internal {
            message: "command does not need a player and was dispatched to one".into(),
        }),
    }
}
