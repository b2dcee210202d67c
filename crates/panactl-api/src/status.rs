// Player status decoding
//
// Two independent comma-separated formats:
//
//   PST            field 0 = playback state, 1 = position (s), 2 = speed
//   STATUS_SIMPLE  field 3 = device mode, 13 = clock time (>= 14 fields)
//
// Decoding is total. Short lines and unparseable numbers fall back to
// `Unknown` / zero per field instead of failing the whole status.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Minimum number of PST fields for the line to be decoded.
pub const PST_MIN_FIELDS: usize = 3;

/// Minimum number of STATUS_SIMPLE fields for the line to be decoded.
pub const STATUS_SIMPLE_MIN_FIELDS: usize = 14;

const PST_STATE_FIELD: usize = 0;
const PST_POSITION_FIELD: usize = 1;
const PST_SPEED_FIELD: usize = 2;
const STATUS_MODE_FIELD: usize = 3;
const STATUS_CLOCK_FIELD: usize = 13;

// ── DeviceMode ───────────────────────────────────────────────────────

/// Coarse device activity, from STATUS_SIMPLE field 3.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceMode {
    Idle,
    TrayOpen,
    Rewind,
    FastForward,
    SlowMotion,
    Standby,
    Playing,
    Paused,
    Unknown,
}

impl DeviceMode {
    /// The two-digit wire code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Idle => "00",
            Self::TrayOpen => "01",
            Self::Rewind => "02",
            Self::FastForward => "05",
            Self::SlowMotion => "06",
            Self::Standby => "07",
            Self::Playing => "08",
            Self::Paused => "09",
            Self::Unknown => "FF",
        }
    }

    /// Map a wire code to a mode; unrecognized codes are `Unknown`.
    pub fn from_code(code: &str) -> Self {
        Self::iter().find(|m| m.code() == code).unwrap_or(Self::Unknown)
    }

    /// SCREAMING_SNAKE_CASE name, e.g. `TRAY_OPEN`.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

// ── PlaybackState ────────────────────────────────────────────────────

/// Fine-grained transport state, from PST field 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
    FastForward,
    Rewind,
    SlowMotion,
    Unknown,
}

impl PlaybackState {
    /// The wire code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Stopped => "0",
            Self::Playing => "1",
            Self::Paused => "2",
            Self::FastForward => "4",
            Self::Rewind => "5",
            Self::SlowMotion => "6",
            Self::Unknown => "99",
        }
    }

    /// Map a wire code to a state; unrecognized codes are `Unknown`.
    pub fn from_code(code: &str) -> Self {
        Self::iter().find(|s| s.code() == code).unwrap_or(Self::Unknown)
    }

    /// SCREAMING_SNAKE_CASE name, e.g. `FAST_FORWARD`.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

// ── Line decoders ────────────────────────────────────────────────────

/// Decoded PST line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PstFields {
    pub playback_state: PlaybackState,
    pub position_seconds: u64,
    pub speed_multiplier: i64,
}

impl Default for PstFields {
    fn default() -> Self {
        Self {
            playback_state: PlaybackState::Unknown,
            position_seconds: 0,
            speed_multiplier: 0,
        }
    }
}

/// Decoded STATUS_SIMPLE line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSimpleFields {
    pub device_mode: DeviceMode,
    pub clock_time: Option<String>,
}

impl Default for StatusSimpleFields {
    fn default() -> Self {
        Self {
            device_mode: DeviceMode::Unknown,
            clock_time: None,
        }
    }
}

/// Parse a PST line (`state,position,speed[,...]`).
pub fn parse_pst(line: &str) -> PstFields {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < PST_MIN_FIELDS {
        return PstFields::default();
    }

    let field = |idx: usize| parts.get(idx).copied().unwrap_or_default();

    PstFields {
        playback_state: PlaybackState::from_code(field(PST_STATE_FIELD)),
        position_seconds: field(PST_POSITION_FIELD).trim().parse().unwrap_or(0),
        speed_multiplier: field(PST_SPEED_FIELD).trim().parse().unwrap_or(0),
    }
}

/// Parse a STATUS_SIMPLE line (at least 14 comma-separated fields).
pub fn parse_status_simple(line: &str) -> StatusSimpleFields {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < STATUS_SIMPLE_MIN_FIELDS {
        return StatusSimpleFields::default();
    }

    let device_mode = parts
        .get(STATUS_MODE_FIELD)
        .map_or(DeviceMode::Unknown, |code| DeviceMode::from_code(code));
    let clock_time = parts
        .get(STATUS_CLOCK_FIELD)
        .filter(|clock| !clock.is_empty())
        .map(|clock| (*clock).to_owned());

    StatusSimpleFields {
        device_mode,
        clock_time,
    }
}

// ── PlayerStatus ─────────────────────────────────────────────────────

/// A complete status snapshot. Only built when both status queries
/// succeeded; there is no partially-filled variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatus {
    pub is_on: bool,
    pub device_mode: DeviceMode,
    pub playback_state: PlaybackState,
    pub position_seconds: u64,
    pub speed_multiplier: i64,
    pub clock_time: Option<String>,
    pub raw_pst: Option<String>,
    pub raw_status: Option<String>,
}

impl PlayerStatus {
    /// Combine the first data line of each status query.
    pub fn from_lines(pst_line: &str, status_line: &str) -> Self {
        let pst = parse_pst(pst_line);
        let simple = parse_status_simple(status_line);

        Self {
            is_on: simple.device_mode != DeviceMode::Standby,
            device_mode: simple.device_mode,
            playback_state: pst.playback_state,
            position_seconds: pst.position_seconds,
            speed_multiplier: pst.speed_multiplier,
            clock_time: simple.clock_time,
            raw_pst: Some(pst_line.to_owned()),
            raw_status: Some(status_line.to_owned()),
        }
    }

    /// Whether the disc tray is open.
    pub fn tray_open(&self) -> bool {
        self.device_mode == DeviceMode::TrayOpen
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pst_playing_line() {
        let pst = parse_pst("1,125,0");
        assert_eq!(pst.playback_state, PlaybackState::Playing);
        assert_eq!(pst.position_seconds, 125);
        assert_eq!(pst.speed_multiplier, 0);
    }

    #[test]
    fn pst_short_lines_fall_back() {
        for line in ["", "1", "1,125", ",", "garbage"] {
            assert_eq!(parse_pst(line), PstFields::default(), "line {line:?}");
        }
    }

    #[test]
    fn pst_bad_numbers_fall_back_per_field() {
        let pst = parse_pst("4,abc,12");
        assert_eq!(pst.playback_state, PlaybackState::FastForward);
        assert_eq!(pst.position_seconds, 0);
        assert_eq!(pst.speed_multiplier, 12);

        let pst = parse_pst("2,300,x,extra,fields");
        assert_eq!(pst.playback_state, PlaybackState::Paused);
        assert_eq!(pst.position_seconds, 300);
        assert_eq!(pst.speed_multiplier, 0);
    }

    #[test]
    fn pst_negative_position_is_zero() {
        assert_eq!(parse_pst("1,-5,-3").position_seconds, 0);
        assert_eq!(parse_pst("1,-5,-3").speed_multiplier, -3);
    }

    #[test]
    fn pst_unknown_state_code() {
        assert_eq!(parse_pst("7,10,0").playback_state, PlaybackState::Unknown);
    }

    #[test]
    fn status_simple_playing_with_clock() {
        let simple = parse_status_simple("x,x,x,08,x,x,x,x,x,x,x,x,x,14:32");
        assert_eq!(simple.device_mode, DeviceMode::Playing);
        assert_eq!(simple.clock_time.as_deref(), Some("14:32"));
    }

    #[test]
    fn status_simple_short_lines_fall_back() {
        for line in ["", "0,0,0,07", "a,b,c,08,e,f,g,h,i,j,k,l,m"] {
            assert_eq!(
                parse_status_simple(line),
                StatusSimpleFields::default(),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn status_simple_empty_clock_is_absent() {
        let simple = parse_status_simple("0,0,0,07,0,0,0,0,0,0,0,0,0,");
        assert_eq!(simple.device_mode, DeviceMode::Standby);
        assert_eq!(simple.clock_time, None);
    }

    #[test]
    fn status_simple_unknown_mode() {
        let simple = parse_status_simple("0,0,0,42,0,0,0,0,0,0,0,0,0,09:00");
        assert_eq!(simple.device_mode, DeviceMode::Unknown);
        assert_eq!(simple.clock_time.as_deref(), Some("09:00"));
    }

    #[test]
    fn mode_codes_round_trip() {
        for mode in DeviceMode::iter() {
            assert_eq!(DeviceMode::from_code(mode.code()), mode);
        }
        assert_eq!(DeviceMode::TrayOpen.name(), "TRAY_OPEN");
        assert_eq!(PlaybackState::FastForward.to_string(), "FAST_FORWARD");
    }

    #[test]
    fn standby_is_off_regardless_of_playback() {
        let status = PlayerStatus::from_lines("1,50,0", "0,0,0,07,0,0,0,0,0,0,0,0,0,12:00");
        assert!(!status.is_on);
        assert_eq!(status.playback_state, PlaybackState::Playing);
    }

    #[test]
    fn from_lines_keeps_raw_lines() {
        let status = PlayerStatus::from_lines("0,0,0", "short");
        assert!(status.is_on);
        assert_eq!(status.device_mode, DeviceMode::Unknown);
        assert_eq!(status.raw_pst.as_deref(), Some("0,0,0"));
        assert_eq!(status.raw_status.as_deref(), Some("short"));
    }
}
