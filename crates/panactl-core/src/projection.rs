// ── Display projections ──
//
// Human-facing views of the published state: the selectable playback
// speeds, the speed label, and the position clock.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

/// A selectable playback speed.
///
/// The multiplier is what the player reports in PST field 2 while the
/// speed is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum SpeedOption {
    #[strum(to_string = "REW 5")]
    Rew5,
    #[strum(to_string = "REW 4")]
    Rew4,
    #[strum(to_string = "REW 3")]
    Rew3,
    #[strum(to_string = "REW 2")]
    Rew2,
    #[strum(to_string = "REW 1")]
    Rew1,
    #[strum(to_string = "Normal")]
    Normal,
    #[strum(to_string = "FF 1")]
    Ff1,
    #[strum(to_string = "FF 2")]
    Ff2,
    #[strum(to_string = "FF 3")]
    Ff3,
    #[strum(to_string = "FF 4")]
    Ff4,
    #[strum(to_string = "FF 5")]
    Ff5,
}

impl SpeedOption {
    /// Command name that selects this speed.
    pub const fn command(self) -> &'static str {
        match self {
            Self::Rew5 => "SEARCH_REV5",
            Self::Rew4 => "SEARCH_REV4",
            Self::Rew3 => "SEARCH_REV3",
            Self::Rew2 => "SEARCH_REV2",
            Self::Rew1 => "SEARCH_REV1",
            Self::Normal => "PLAYBACK",
            Self::Ff1 => "SEARCH_FWD1",
            Self::Ff2 => "SEARCH_FWD2",
            Self::Ff3 => "SEARCH_FWD3",
            Self::Ff4 => "SEARCH_FWD4",
            Self::Ff5 => "SEARCH_FWD5",
        }
    }

    /// Speed multiplier the player reports for this speed.
    pub const fn multiplier(self) -> i64 {
        match self {
            Self::Rew5 => 24,
            Self::Rew4 => 23,
            Self::Rew3 => 22,
            Self::Rew2 => 21,
            Self::Rew1 => 20,
            Self::Normal => 0,
            Self::Ff1 => 10,
            Self::Ff2 => 11,
            Self::Ff3 => 12,
            Self::Ff4 => 13,
            Self::Ff5 => 14,
        }
    }

    /// Parse a label such as `"FF 3"`, `"ff3"` or `"normal"`.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = normalize(label);
        Self::iter().find(|opt| normalize(&opt.to_string()) == wanted)
    }

    /// The option whose multiplier is `multiplier`, if it is selectable.
    pub fn from_multiplier(multiplier: i64) -> Option<Self> {
        Self::iter().find(|opt| opt.multiplier() == multiplier)
    }

    /// The option to show as selected. Anything that is not a selectable
    /// speed, slow motion included, shows as `Normal`.
    pub fn current_option(multiplier: i64) -> Self {
        Self::from_multiplier(multiplier).unwrap_or(Self::Normal)
    }

    /// Every option in display order, fastest rewind first.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Every option label in display order.
    pub fn labels() -> Vec<String> {
        Self::all().map(|opt| opt.to_string()).collect()
    }
}

fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Human-readable name for a reported speed multiplier.
pub fn speed_label(multiplier: i64) -> String {
    match multiplier {
        0 => "Normal".into(),
        10..=14 => format!("FF {}", multiplier - 9),
        15..=18 => format!("Slow {}", multiplier - 14),
        20..=24 => format!("REW {}", multiplier - 19),
        _ => format!("Unknown ({multiplier})"),
    }
}

/// Format a position in seconds as `HH:MM:SS`. Hours are not wrapped.
pub fn format_position(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
