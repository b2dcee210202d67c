// ── Runtime device configuration ──
//
// Describes *how* to reach one player and how often to poll it. Never
// touches disk: the CLI builds a `DeviceConfig` from its profile and
// hands it in.

use std::time::Duration;

use panactl_api::TransportConfig;

use crate::error::CoreError;

/// Default poll interval in seconds.
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 5;
/// Smallest accepted poll interval in seconds.
pub const MIN_SCAN_INTERVAL_SECS: u64 = 1;
/// Largest accepted poll interval in seconds.
pub const MAX_SCAN_INTERVAL_SECS: u64 = 60;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// Default display name for a player.
pub const DEFAULT_NAME: &str = "Panasonic Blu-ray";

/// Connection and polling settings for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Bare `host` or `host:port`.
    pub host: String,
    pub name: String,
    pub scan_interval: Duration,
    pub timeout: Duration,
}

impl DeviceConfig {
    /// Config for `host` with every other setting at its default.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            name: DEFAULT_NAME.into(),
            scan_interval: Duration::from_secs(DEFAULT_SCAN_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Check ranges. Host syntax is checked when the client is built.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.host.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "host must not be empty".into(),
            });
        }

        let interval = self.scan_interval.as_secs();
        if !(MIN_SCAN_INTERVAL_SECS..=MAX_SCAN_INTERVAL_SECS).contains(&interval)
            || self.scan_interval.subsec_nanos() != 0
        {
            return Err(CoreError::Validation {
                message: format!(
                    "scan interval must be a whole number of seconds between \
                     {MIN_SCAN_INTERVAL_SECS} and {MAX_SCAN_INTERVAL_SECS}"
                ),
            });
        }

        if self.timeout.is_zero() {
            return Err(CoreError::Validation {
                message: "timeout must be positive".into(),
            });
        }

        Ok(())
    }

    /// Transport settings derived from this config.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::with_timeout(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DeviceConfig::new("192.168.1.40");
        assert!(config.validate().is_ok());
        assert_eq!(config.scan_interval, Duration::from_secs(5));
        assert_eq!(config.transport().timeout, Duration::from_secs(5));
    }

    #[test]
    fn scan_interval_bounds() {
        let mut config = DeviceConfig::new("player");
        for secs in [1, 30, 60] {
            config.scan_interval = Duration::from_secs(secs);
            assert!(config.validate().is_ok(), "{secs}s should be accepted");
        }
        for secs in [0, 61, 3600] {
            config.scan_interval = Duration::from_secs(secs);
            assert!(
                matches!(config.validate(), Err(CoreError::Validation { .. })),
                "{secs}s should be rejected"
            );
        }
        config.scan_interval = Duration::from_millis(1500);
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_host_and_zero_timeout_rejected() {
        assert!(DeviceConfig::new("  ").validate().is_err());

        let mut config = DeviceConfig::new("player");
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
