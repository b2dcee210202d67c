//! Clap derive structures for the `panactl` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace types so `build.rs` can include it for man pages.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// panactl -- remote control for Panasonic Blu-ray players
#[derive(Debug, Parser)]
#[command(
    name = "panactl",
    version,
    about = "Control Panasonic Blu-ray players over the network",
    long_about = "Control Panasonic Blu-ray players from the command line.\n\n\
        Talks to the player's HTTP remote-control endpoint: sends remote\n\
        buttons, reads playback status, and follows state changes.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Player profile to use
    #[arg(long, short = 'p', env = "PANACTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Player address, `host` or `host:port` (overrides profile)
    #[arg(long, short = 'H', env = "PANACTL_HOST", global = true)]
    pub host: Option<String>,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PANACTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format [default: `defaults.output` from the config, else table]
    #[arg(
        id = "output",
        long = "output",
        short = 'o',
        value_name = "OUTPUT",
        env = "PANACTL_OUTPUT",
        global = true
    )]
    pub output_flag: Option<OutputFormat>,

    /// Effective output format, resolved against the config after parsing.
    #[arg(skip)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the player's current status
    #[command(alias = "st")]
    Status,

    /// Send one or more remote-control commands
    Send(SendArgs),

    /// Power the player on or off
    Power(PowerArgs),

    /// Open, close, or query the disc tray
    Tray(TrayArgs),

    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Stop playback
    Stop,

    /// Skip to the next chapter
    Next,

    /// Skip to the previous chapter
    #[command(alias = "previous")]
    Prev,

    /// Show or select the playback speed
    Speed(SpeedArgs),

    /// Poll the player and print every state change
    Watch(WatchArgs),

    /// List the known remote-control command names
    #[command(alias = "cmds")]
    Commands,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Send ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SendArgs {
    /// Command names (e.g. PLAY, UP, OK, 7) or raw `cCMD_` tokens
    #[arg(required = true, value_name = "COMMAND")]
    pub commands: Vec<String>,

    /// Send the whole sequence this many times (at most 100)
    #[arg(long, short = 'r', default_value = "1")]
    pub repeat: usize,

    /// Seconds to wait after each command
    #[arg(long, short = 'd', default_value = "0.4")]
    pub delay: f64,
}

// ── Power ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PowerArgs {
    #[command(subcommand)]
    pub command: PowerCommand,
}

#[derive(Debug, Subcommand)]
pub enum PowerCommand {
    /// Wake the player (skipped when it is already on)
    On,
    /// Put the player in standby (skipped when it is already off)
    Off,
    /// Toggle power without checking state
    Toggle,
}

// ── Tray ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TrayArgs {
    #[command(subcommand)]
    pub command: TrayCommand,
}

#[derive(Debug, Subcommand)]
pub enum TrayCommand {
    /// Open the disc tray
    Open,
    /// Close the disc tray
    Close,
    /// Toggle the disc tray
    Toggle,
    /// Report whether the tray is open
    Status,
}

// ── Speed ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SpeedArgs {
    /// Speed to select: "REW 5".."REW 1", "Normal", "FF 1".."FF 5"
    /// (case and spacing are ignored, so `ff3` works). Omit to show the
    /// current speed.
    pub option: Option<String>,

    /// List the selectable speeds
    #[arg(long, short = 'l', conflicts_with = "option")]
    pub list: bool,
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll interval in seconds (overrides profile)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,

    /// Exit after this many published states
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the effective configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Key: host, name, scan_interval, timeout
        key: String,
        /// New value
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
