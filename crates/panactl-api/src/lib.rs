// panactl-api: Async Rust client for the Panasonic Blu-ray HTTP control interface

pub mod client;
pub mod command;
pub mod error;
pub mod status;
pub mod transport;

pub use client::{CommandOutcome, PlayStatus, PlayStatusKind, PlayerClient};
pub use error::Error;
pub use status::{DeviceMode, PlaybackState, PlayerStatus};
pub use transport::{RawResponse, Transport, TransportConfig};
