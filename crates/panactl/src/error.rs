//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use panactl_config::ConfigError;
use panactl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
    pub const COMMAND: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to player at {host}")]
    #[diagnostic(
        code(panactl::connection_failed),
        help(
            "Check that the player is powered and on the network.\n\
             Host: {host}"
        )
    )]
    ConnectionFailed {
        host: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No status received from player at {host}")]
    #[diagnostic(
        code(panactl::unavailable),
        help(
            "The player did not answer the status queries.\n\
             Enable network standby and remote operation in the player's\n\
             network settings, then try: panactl --host {host} status"
        )
    )]
    PlayerUnavailable { host: String },

    // ── Commands ─────────────────────────────────────────────────────
    #[error("Player rejected command '{command}' (response code: {code})")]
    #[diagnostic(
        code(panactl::command_rejected),
        help("Run: panactl commands to see known command names")
    )]
    CommandRejected { command: String, code: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(panactl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(panactl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: panactl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No player configured")]
    #[diagnostic(
        code(panactl::no_config),
        help(
            "Create a profile with: panactl config init\n\
             Or pass --host (PANACTL_HOST).\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(panactl::config))]
    Config(Box<ConfigError>),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(panactl::internal))]
    Internal { message: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::PlayerUnavailable { .. } => {
                exit_code::CONNECTION
            }
            Self::CommandRejected { .. } => exit_code::COMMAND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { host, reason } => CliError::ConnectionFailed {
                host,
                source: reason.into(),
            },

            CoreError::UpdateFailed { message } => CliError::ConnectionFailed {
                host: "(player)".into(),
                source: message.into(),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Validation { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        let rejected = CliError::CommandRejected {
            command: "ZOOM".into(),
            code: "02".into(),
        };
        assert_eq!(rejected.exit_code(), exit_code::COMMAND);

        let unavailable = CliError::PlayerUnavailable {
            host: "10.0.0.2".into(),
        };
        assert_eq!(unavailable.exit_code(), exit_code::CONNECTION);

        let validation = CliError::from(CoreError::Validation {
            message: "repeat count must be at least 1".into(),
        });
        assert_eq!(validation.exit_code(), exit_code::USAGE);

        let missing = CliError::NoConfig {
            path: "/tmp/config.toml".into(),
        };
        assert_eq!(missing.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_errors_keep_their_shape() {
        let err = CliError::from(ConfigError::ProfileNotFound {
            name: "den".into(),
            available: "living".into(),
        });
        assert!(matches!(err, CliError::ProfileNotFound { ref name, .. } if name == "den"));

        let err = CliError::from(ConfigError::Validation {
            field: "host".into(),
            reason: "empty".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
