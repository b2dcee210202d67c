//! Watch command handler: runs the poll loop and prints every published
//! state until interrupted.

use std::time::Duration;

use futures_util::StreamExt;

use panactl_core::config::{MAX_SCAN_INTERVAL_SECS, MIN_SCAN_INTERVAL_SECS};
use panactl_core::{Coordinator, PlayerState, format_position, speed_label};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

fn interval_from(secs: u64) -> Result<Duration, CliError> {
    if (MIN_SCAN_INTERVAL_SECS..=MAX_SCAN_INTERVAL_SECS).contains(&secs) {
        Ok(Duration::from_secs(secs))
    } else {
        Err(CliError::Validation {
            field: "interval".into(),
            reason: format!(
                "must be between {MIN_SCAN_INTERVAL_SECS} and {MAX_SCAN_INTERVAL_SECS} seconds, got {secs}"
            ),
        })
    }
}

/// One line per published state.
fn line(state: &PlayerState, color: bool) -> String {
    let at = state
        .media_position_updated_at
        .unwrap_or_else(chrono::Utc::now)
        .format("%H:%M:%S");
    let tray = match state.tray_open {
        Some(true) => "open",
        Some(false) => "closed",
        None => "-",
    };
    format!(
        "{at}  {:<8}  {}  {:<10}  tray {tray}",
        output::paint_state(state.state, color),
        format_position(state.media_position),
        speed_label(state.speed_multiplier),
    )
}

fn structured(format: OutputFormat, state: &PlayerState) -> Result<String, CliError> {
    output::render_single(format, state, |_| String::new(), |_| String::new())
}

fn render(state: &PlayerState, global: &GlobalOpts, color: bool) -> Result<String, CliError> {
    match global.output {
        // Line-delimited so each update parses on its own
        OutputFormat::Json | OutputFormat::JsonCompact => {
            structured(OutputFormat::JsonCompact, state)
        }
        OutputFormat::Yaml => {
            let doc = structured(OutputFormat::Yaml, state)?;
            Ok(format!("---\n{}", doc.trim_end()))
        }
        OutputFormat::Table | OutputFormat::Plain => Ok(line(state, color)),
    }
}

pub async fn handle(
    coordinator: &Coordinator,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let coordinator = match args.interval {
        Some(secs) => Coordinator::new(
            coordinator.backend().clone(),
            coordinator.name(),
            interval_from(secs)?,
        ),
        None => coordinator.clone(),
    };
    let color = output::should_color(global.color);

    coordinator.start().await?;
    if !global.quiet {
        eprintln!(
            "Watching {} every {}s (Ctrl-C to stop)",
            coordinator.name(),
            coordinator.scan_interval().as_secs()
        );
    }

    let mut updates = coordinator.subscribe().into_stream();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut printed = 0usize;
    let result = loop {
        tokio::select! {
            _ = &mut shutdown => break Ok(()),
            next = updates.next() => {
                let Some(state) = next else { break Ok(()) };
                match render(&state, global, color) {
                    Ok(out) => output::print_output(&out, global.quiet),
                    Err(e) => break Err(e),
                }
                printed += 1;
                if args.count.is_some_and(|n| printed >= n) {
                    break Ok(());
                }
            }
        }
    };

    coordinator.stop().await;
    result
}

#[cfg(test)]
mod tests {
    use panactl_core::PlayerStatus;

    use super::*;

    #[test]
    fn interval_bounds() {
        assert!(interval_from(1).is_ok());
        assert!(interval_from(60).is_ok());
        assert!(matches!(interval_from(0), Err(CliError::Validation { .. })));
        assert!(interval_from(61).is_err());
    }

    #[test]
    fn line_summarizes_state() {
        let status = PlayerStatus::from_lines("2,90,0", "0,0,0,09,0,0,0,0,0,0,0,0,0,08:00");
        let state = PlayerState::from_status(&status, chrono::Utc::now());

        let text = line(&state, false);

        assert!(text.contains("PAUSED"));
        assert!(text.contains("00:01:30"));
        assert!(text.contains("Normal"));
        assert!(text.contains("tray closed"));
    }

    #[test]
    fn unknown_state_line() {
        let text = line(&PlayerState::unknown(), false);
        assert!(text.contains("unknown"));
        assert!(text.contains("tray -"));
    }
}
