use thiserror::Error;

/// Top-level error type for the `panactl-api` crate.
///
/// Only client construction can fail publicly. Request-level failures
/// (connection refused, timeout, non-2xx) are absorbed by
/// [`Transport::post`](crate::transport::Transport::post) and reported as
/// an unsuccessful [`RawResponse`](crate::transport::RawResponse).
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// The configured host is not a bare `host[:port]`.
    #[error("Invalid host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered with a non-success HTTP status.
    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },
}

impl Error {
    /// Returns `true` if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the device could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    /// Returns `true` if the error happened while building the client,
    /// i.e. it is a configuration problem rather than a device problem.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidHost { .. } | Self::InvalidUrl(_) | Self::ClientBuild(_)
        )
    }
}
