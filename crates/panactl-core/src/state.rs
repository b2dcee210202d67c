// ── Published player state ──
//
// The flattened view the coordinator publishes after every poll. Absent
// fields mean "unknown", never "off".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use panactl_api::{DeviceMode, PlaybackState, PlayerStatus};

/// High-level media state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaState {
    Off,
    Idle,
    Playing,
    Paused,
}

impl MediaState {
    /// Derive the media state from a status snapshot.
    ///
    /// Power wins over everything; the device mode decides the rest.
    /// Seek modes count as playing.
    pub fn from_status(status: &PlayerStatus) -> Self {
        if !status.is_on {
            return Self::Off;
        }
        match status.device_mode {
            DeviceMode::Playing
            | DeviceMode::FastForward
            | DeviceMode::Rewind
            | DeviceMode::SlowMotion => Self::Playing,
            DeviceMode::Paused => Self::Paused,
            DeviceMode::TrayOpen | DeviceMode::Idle | DeviceMode::Standby | DeviceMode::Unknown => {
                Self::Idle
            }
        }
    }
}

/// State published to subscribers after each poll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlayerState {
    pub state: Option<MediaState>,
    pub is_on: Option<bool>,
    pub device_mode: Option<DeviceMode>,
    pub device_mode_value: Option<String>,
    pub playback_state: Option<PlaybackState>,
    pub playback_state_value: Option<String>,
    pub media_position: u64,
    pub media_position_updated_at: Option<DateTime<Utc>>,
    pub media_duration: u64,
    pub speed_multiplier: i64,
    pub tray_open: Option<bool>,
    pub clock_time: Option<String>,
    pub raw_pst: Option<String>,
    pub raw_status: Option<String>,
}

impl PlayerState {
    /// The sentinel published when no status could be read.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Flatten a status snapshot taken at `now`.
    pub fn from_status(status: &PlayerStatus, now: DateTime<Utc>) -> Self {
        Self {
            state: Some(MediaState::from_status(status)),
            is_on: Some(status.is_on),
            device_mode: Some(status.device_mode),
            device_mode_value: Some(status.device_mode.code().to_owned()),
            playback_state: Some(status.playback_state),
            playback_state_value: Some(status.playback_state.code().to_owned()),
            media_position: status.position_seconds,
            media_position_updated_at: Some(now),
            media_duration: 0,
            speed_multiplier: status.speed_multiplier,
            tray_open: Some(status.tray_open()),
            clock_time: status.clock_time.clone(),
            raw_pst: status.raw_pst.clone(),
            raw_status: status.raw_status.clone(),
        }
    }

    /// Whether the last poll produced no status.
    pub fn is_unknown(&self) -> bool {
        self.state.is_none()
    }

    /// `Some(true)` only when the player is known to be in standby.
    pub fn is_off(&self) -> Option<bool> {
        self.state.map(|s| s == MediaState::Off)
    }
}
