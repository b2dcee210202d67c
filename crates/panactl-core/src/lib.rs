// panactl-core: Polling coordinator and published state between panactl-api and the CLI.

pub mod action;
pub mod backend;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod projection;
pub mod state;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{Action, ActionResult, MAX_REPEATS, SentCommand};
pub use backend::PlayerBackend;
pub use config::DeviceConfig;
pub use coordinator::{Availability, Coordinator};
pub use error::CoreError;
pub use projection::{SpeedOption, format_position, speed_label};
pub use state::{MediaState, PlayerState};
pub use stream::StateStream;

// Wire-level types consumers need alongside the state model.
pub use panactl_api::{CommandOutcome, DeviceMode, PlaybackState, PlayerStatus, command};
