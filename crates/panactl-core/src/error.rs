// ── Core error types ──
//
// Errors surfaced by panactl-core. Request-level failures never reach
// this type: the client reports them as unsuccessful commands or absent
// status. What remains is construction, validation, and failed poll
// cycles.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to player at {host}: {reason}")]
    ConnectionFailed { host: String, reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Poll errors ──────────────────────────────────────────────────
    /// A poll cycle raised instead of returning a status. The previously
    /// published state is left in place.
    #[error("Error communicating with player: {message}")]
    UpdateFailed { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<panactl_api::Error> for CoreError {
    fn from(err: panactl_api::Error) -> Self {
        match err {
            panactl_api::Error::InvalidHost { host, reason } => CoreError::Config {
                message: format!("invalid host '{host}': {reason}"),
            },
            panactl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            panactl_api::Error::ClientBuild(message) => CoreError::Internal(message),
            panactl_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                host: e
                    .url()
                    .and_then(|u| u.host_str().map(str::to_owned))
                    .unwrap_or_else(|| "<unknown>".into()),
                reason: err.to_string(),
            },
            panactl_api::Error::HttpStatus { status } => CoreError::ConnectionFailed {
                host: String::new(),
                reason: format!("HTTP status {status}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_host_is_config_error() {
        let err = CoreError::from(panactl_api::Error::InvalidHost {
            host: "http://x".into(),
            reason: "scheme".into(),
        });
        assert!(matches!(err, CoreError::Config { .. }));
        assert!(err.to_string().contains("http://x"));
    }

    #[test]
    fn http_status_is_connection_error() {
        let err = CoreError::from(panactl_api::Error::HttpStatus { status: 503 });
        assert!(matches!(err, CoreError::ConnectionFailed { .. }));
        assert!(err.to_string().contains("503"));
    }
}
