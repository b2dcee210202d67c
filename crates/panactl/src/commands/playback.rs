//! Transport button handlers: play, pause, stop, next, prev.

use panactl_core::{Action, Coordinator};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

pub async fn handle(
    coordinator: &Coordinator,
    action: Action,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::run_action(coordinator, action, global).await
}
