//! Status command handler.

use panactl_core::{Coordinator, PlayerState, format_position, speed_label};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

fn yes_no(value: Option<bool>, yes: &str, no: &str) -> String {
    match value {
        Some(true) => yes.into(),
        Some(false) => no.into(),
        None => "-".into(),
    }
}

/// Key/value block for one state snapshot.
pub(crate) fn detail(name: &str, state: &PlayerState, color: bool) -> String {
    let mode = state.device_mode.map_or_else(
        || "-".into(),
        |m| format!("{m} ({})", state.device_mode_value.as_deref().unwrap_or("-")),
    );
    let playback = state.playback_state.map_or_else(
        || "-".into(),
        |p| format!("{p} ({})", state.playback_state_value.as_deref().unwrap_or("-")),
    );

    let lines = [
        format!("Player:    {name}"),
        format!("State:     {}", output::paint_state(state.state, color)),
        format!("Power:     {}", yes_no(state.is_on, "on", "standby")),
        format!("Mode:      {mode}"),
        format!("Playback:  {playback}"),
        format!("Position:  {}", format_position(state.media_position)),
        format!("Speed:     {}", speed_label(state.speed_multiplier)),
        format!("Tray:      {}", yes_no(state.tray_open, "open", "closed")),
        format!("Clock:     {}", state.clock_time.as_deref().unwrap_or("-")),
        format!(
            "Updated:   {}",
            state
                .media_position_updated_at
                .map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        ),
    ];
    lines.join("\n")
}

pub async fn handle(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    let state = util::refresh_required(coordinator).await?;
    let color = output::should_color(global.color);

    let out = output::render_single(
        global.output,
        state.as_ref(),
        |s| detail(coordinator.name(), s, color),
        |s| output::paint_state(s.state, false).to_lowercase(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use panactl_core::PlayerStatus;

    use super::*;

    #[test]
    fn detail_lists_decoded_fields() {
        let status = PlayerStatus::from_lines("1,3725,12", "0,0,0,08,0,0,0,0,0,0,0,0,0,21:05");
        let state = PlayerState::from_status(&status, chrono::Utc::now());

        let text = detail("Den", &state, false);

        assert!(text.contains("Player:    Den"));
        assert!(text.contains("State:     PLAYING"));
        assert!(text.contains("Position:  01:02:05"));
        assert!(text.contains("Speed:     FF 3"));
        assert!(text.contains("Clock:     21:05"));
        assert!(text.contains("Power:     on"));
    }

    #[test]
    fn detail_of_unknown_state() {
        let text = detail("Den", &PlayerState::unknown(), false);

        assert!(text.contains("State:     unknown"));
        assert!(text.contains("Power:     -"));
        assert!(text.contains("Position:  00:00:00"));
    }
}
