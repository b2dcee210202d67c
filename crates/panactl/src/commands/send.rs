//! Send command handler.

use std::time::Duration;

use tracing::warn;

use panactl_core::{Action, Coordinator, command};

use crate::cli::{GlobalOpts, SendArgs};
use crate::error::CliError;

use super::util;

fn parse_delay(secs: f64) -> Result<Duration, CliError> {
    Duration::try_from_secs_f64(secs).map_err(|_| CliError::Validation {
        field: "delay".into(),
        reason: format!("expected a non-negative number of seconds, got {secs}"),
    })
}

/// Names that are neither a listed alias nor a raw token; their token is
/// guessed by prefixing.
fn guessed<'a>(commands: &'a [String]) -> impl Iterator<Item = &'a str> {
    commands
        .iter()
        .map(String::as_str)
        .filter(|c| !command::is_known(c) && !c.starts_with(command::TOKEN_PREFIX))
}

pub async fn handle(
    coordinator: &Coordinator,
    args: SendArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let delay = parse_delay(args.delay)?;
    for name in guessed(&args.commands) {
        warn!(
            "'{name}' is not a known command, sending {}",
            command::resolve(name)
        );
    }

    util::run_action(
        coordinator,
        Action::Send {
            commands: args.commands,
            repeats: args.repeat,
            delay,
        },
        global,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_must_be_non_negative() {
        assert_eq!(parse_delay(0.4).ok(), Some(Duration::from_millis(400)));
        assert_eq!(parse_delay(0.0).ok(), Some(Duration::ZERO));
        assert!(matches!(parse_delay(-1.0), Err(CliError::Validation { .. })));
        assert!(parse_delay(f64::NAN).is_err());
    }

    #[test]
    fn only_unlisted_names_are_guessed() {
        let commands: Vec<String> = ["up", "TRAYOPEN", "cCMD_RC_CHROMECAST", "rec", "Zoom_In"]
            .into_iter()
            .map(Into::into)
            .collect();

        assert_eq!(guessed(&commands).collect::<Vec<_>>(), vec!["rec", "Zoom_In"]);
    }
}
