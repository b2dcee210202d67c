//! Tray command handlers.

use serde::Serialize;

use panactl_core::{Action, Coordinator};

use crate::cli::{GlobalOpts, TrayArgs, TrayCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct TrayStatus {
    tray_open: bool,
}

pub async fn handle(
    coordinator: &Coordinator,
    args: TrayArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let action = match args.command {
        TrayCommand::Open => Action::OpenTray,
        TrayCommand::Close => Action::CloseTray,
        TrayCommand::Toggle => Action::ToggleTray,
        TrayCommand::Status => return status(coordinator, global).await,
    };
    util::run_action(coordinator, action, global).await
}

async fn status(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    let state = util::refresh_required(coordinator).await?;
    let report = TrayStatus {
        tray_open: state.tray_open.unwrap_or(false),
    };

    let label = |t: &TrayStatus| if t.tray_open { "open" } else { "closed" }.to_owned();
    let out = output::render_single(
        global.output,
        &report,
        |t| format!("Tray: {}", label(t)),
        label,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
