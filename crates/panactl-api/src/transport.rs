// Player HTTP transport
//
// Every exchange with the player is a form-style POST to one fixed CGI
// endpoint, answered by CRLF-delimited text. This module owns the client
// builder, the endpoint URL, and the response line splitting. Request
// failures never escape `Transport::post`; they collapse into an
// unsuccessful `RawResponse`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Path of the control CGI on the player.
pub const ENDPOINT_PATH: &str = "/WAN/dvdr/dvdr_ctrl.cgi";

/// User agent the player expects from its own remote-control apps.
pub const USER_AGENT: &str = "MEI-LAN-REMOTE-CALL";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Response code the player uses for success.
pub const SUCCESS_CODE: &str = "00";

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Config with a custom timeout and the default user agent.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}

// ── Raw response ─────────────────────────────────────────────────────

/// A decoded player response: the status code from line 0 plus every
/// non-blank payload line after it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    pub success: bool,
    pub response_code: Option<String>,
    pub data_lines: Vec<String>,
}

impl RawResponse {
    /// The value reported for any network-level failure.
    pub fn failure() -> Self {
        Self::default()
    }

    /// Split a response body on CRLF.
    ///
    /// The code is the text of line 0 before its first comma (or the whole
    /// line). Blank and whitespace-only lines are dropped from the payload;
    /// kept lines are stored verbatim.
    pub fn parse(body: &str) -> Self {
        let mut lines = body.split("\r\n");
        let first = lines.next().unwrap_or_default();
        let code = first.split_once(',').map_or(first, |(code, _)| code);

        let data_lines = lines
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            success: code == SUCCESS_CODE,
            response_code: Some(code.to_owned()),
            data_lines,
        }
    }

    /// First payload line, if any.
    pub fn first_line(&self) -> Option<&str> {
        self.data_lines.first().map(String::as_str)
    }
}

// ── Transport ────────────────────────────────────────────────────────

/// HTTP transport bound to a single player.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    endpoint: Url,
    host: String,
}

impl Transport {
    /// Create a transport for `host` (a bare `host` or `host:port`).
    ///
    /// This is the only fallible step: the host is validated and the HTTP
    /// client is built here, so polling never hits a configuration error.
    pub fn new(host: &str, config: &TransportConfig) -> Result<Self, Error> {
        let http = config.build_client()?;
        Self::with_client(http, host)
    }

    /// Create a transport with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, host: &str) -> Result<Self, Error> {
        let endpoint = endpoint_url(host)?;
        Ok(Self {
            http,
            endpoint,
            host: host.to_owned(),
        })
    }

    /// The configured host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The full control endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST `body` to the control endpoint.
    ///
    /// The body is sent as-is (no extra percent-encoding). Any failure
    /// below the protocol (connect, timeout, non-2xx, unreadable body)
    /// yields [`RawResponse::failure`].
    pub async fn post(&self, body: &str) -> RawResponse {
        match self.try_post(body).await {
            Ok(text) => RawResponse::parse(&text),
            Err(e) => {
                debug!(
                    error = %e,
                    host = %self.host,
                    timeout = e.is_timeout(),
                    unreachable = e.is_connect(),
                    "player request failed"
                );
                RawResponse::failure()
            }
        }
    }

    async fn try_post(&self, body: &str) -> Result<String, Error> {
        debug!("POST {} {}", self.endpoint, body);

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.to_owned())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Build `http://<host>/WAN/dvdr/dvdr_ctrl.cgi`, rejecting anything that is
/// not a bare authority.
fn endpoint_url(host: &str) -> Result<Url, Error> {
    let invalid = |reason: &str| Error::InvalidHost {
        host: host.to_owned(),
        reason: reason.to_owned(),
    };

    if host.trim().is_empty() {
        return Err(invalid("host is empty"));
    }
    if host.contains("://") {
        return Err(invalid("expected a host name or address without a scheme"));
    }
    if host
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
    {
        return Err(invalid("expected `host` or `host:port`"));
    }

    let url = Url::parse(&format!("http://{host}{ENDPOINT_PATH}"))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("no host component"));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_splits_code_and_payload() {
        let resp = RawResponse::parse("01,extra\r\nlinedata\r\n");
        assert_eq!(resp.response_code.as_deref(), Some("01"));
        assert_eq!(resp.data_lines, vec!["linedata".to_string()]);
        assert!(!resp.success);
    }

    #[test]
    fn parse_success_without_comma() {
        let resp = RawResponse::parse("00\r\n1,125,0\r\n");
        assert!(resp.success);
        assert_eq!(resp.response_code.as_deref(), Some("00"));
        assert_eq!(resp.first_line(), Some("1,125,0"));
    }

    #[test]
    fn parse_drops_blank_lines_and_keeps_order() {
        let resp = RawResponse::parse("00, \r\n\r\nfirst\r\n   \r\nsecond\r\n");
        assert_eq!(resp.data_lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn parse_empty_body_is_unsuccessful() {
        let resp = RawResponse::parse("");
        assert!(!resp.success);
        assert!(resp.data_lines.is_empty());
    }

    #[test]
    fn failure_has_no_code() {
        let resp = RawResponse::failure();
        assert!(!resp.success);
        assert_eq!(resp.response_code, None);
        assert!(resp.data_lines.is_empty());
    }

    #[test]
    fn endpoint_for_plain_host() {
        let url = endpoint_url("192.168.1.40").unwrap();
        assert_eq!(url.as_str(), "http://192.168.1.40/WAN/dvdr/dvdr_ctrl.cgi");
    }

    #[test]
    fn endpoint_keeps_port() {
        let url = endpoint_url("player.local:8080").unwrap();
        assert_eq!(url.as_str(), "http://player.local:8080/WAN/dvdr/dvdr_ctrl.cgi");
    }

    #[test]
    fn endpoint_rejects_scheme_and_paths() {
        for bad in ["", "  ", "http://10.0.0.2", "10.0.0.2/x", "a b", "user@host"] {
            assert!(
                matches!(endpoint_url(bad), Err(Error::InvalidHost { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn endpoint_rejects_bad_port() {
        assert!(endpoint_url("10.0.0.2:notaport").is_err());
    }
}
