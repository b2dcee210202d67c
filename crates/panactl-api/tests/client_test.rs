// Integration tests for `PlayerClient` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use panactl_api::{
    DeviceMode, Error, PlayStatusKind, PlaybackState, PlayerClient, Transport, TransportConfig,
};

const ENDPOINT: &str = "/WAN/dvdr/dvdr_ctrl.cgi";
const PST_BODY: &str = "cCMD_PST.x=100&cCMD_PST.y=100";
const SIMPLE_BODY: &str = "cCMD_RC_STATUS_SIMPLE.x=100&cCMD_RC_STATUS_SIMPLE.y=100";

// ── Helpers ─────────────────────────────────────────────────────────

fn host_of(server: &MockServer) -> String {
    server.uri().trim_start_matches("http://").to_owned()
}

async fn setup() -> (MockServer, PlayerClient) {
    let server = MockServer::start().await;
    let client = PlayerClient::new(&host_of(&server), &TransportConfig::default()).unwrap();
    (server, client)
}

async fn mount_reply(server: &MockServer, body: &str, reply: &str) {
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string(body))
        .respond_with(ResponseTemplate::new(200).set_body_string(reply))
        .mount(server)
        .await;
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_send_command_posts_token_with_headers() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("user-agent", "MEI-LAN-REMOTE-CALL"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("cCMD_RC_PLAYBACK.x=100&cCMD_RC_PLAYBACK.y=100"))
        .respond_with(ResponseTemplate::new(200).set_body_string("00,\r\n"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client.send_command("play").await;

    assert!(outcome.success);
    assert_eq!(outcome.response_code.as_deref(), Some("00"));
}

#[tokio::test]
async fn test_rejected_command_reports_code() {
    let (server, client) = setup().await;
    mount_reply(
        &server,
        "cCMD_RC_REC.x=100&cCMD_RC_REC.y=100",
        "02,unsupported\r\n",
    )
    .await;

    let outcome = client.send_command("rec").await;

    assert!(!outcome.success);
    assert_eq!(outcome.response_code.as_deref(), Some("02"));
}

#[tokio::test]
async fn test_same_command_twice_sends_identical_requests() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string("cCMD_RC_STOP.x=100&cCMD_RC_STOP.y=100"))
        .respond_with(ResponseTemplate::new(200).set_body_string("00\r\n"))
        .expect(2)
        .mount(&server)
        .await;

    assert!(client.stop().await);
    assert!(client.stop().await);
}

#[tokio::test]
async fn test_convenience_methods_map_to_tokens() {
    let (server, client) = setup().await;

    for token in [
        "cCMD_RC_POWERON",
        "cCMD_RC_POWEROFF",
        "cCMD_RC_POWER",
        "cCMD_RC_PAUSE",
        "cCMD_RC_SKIPFWD",
        "cCMD_RC_SKIPREV",
        "cCMD_RC_TRAYOPEN",
        "cCMD_RC_TRAYCLOSE",
        "cCMD_RC_OP_CL",
    ] {
        Mock::given(method("POST"))
            .and(body_string(format!("{token}.x=100&{token}.y=100")))
            .respond_with(ResponseTemplate::new(200).set_body_string("00\r\n"))
            .expect(1)
            .mount(&server)
            .await;
    }

    assert!(client.power_on().await);
    assert!(client.power_off().await);
    assert!(client.toggle_power().await);
    assert!(client.pause().await);
    assert!(client.next_track().await);
    assert!(client.previous_track().await);
    assert!(client.open_tray().await);
    assert!(client.close_tray().await);
    assert!(client.toggle_tray().await);
}

#[tokio::test]
async fn test_send_commands_repeats_in_order() {
    let (server, client) = setup().await;
    mount_reply(&server, "cCMD_RC_UP.x=100&cCMD_RC_UP.y=100", "00\r\n").await;
    mount_reply(&server, "cCMD_RC_SELECT.x=100&cCMD_RC_SELECT.y=100", "01\r\n").await;

    let outcomes = client
        .send_commands(&["UP", "OK"], 2, Duration::ZERO)
        .await;

    let names: Vec<&str> = outcomes.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["UP", "OK", "UP", "OK"]);
    assert!(outcomes[0].1.success);
    assert!(!outcomes[1].1.success);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 4);
}

#[tokio::test]
async fn test_unreachable_player_is_unsuccessful() {
    let config = TransportConfig::with_timeout(Duration::from_millis(500));
    let client = PlayerClient::new("127.0.0.1:1", &config).unwrap();

    let outcome = client.send_command("POWER").await;

    assert!(!outcome.success);
    assert_eq!(outcome.response_code, None);
    assert_eq!(client.get_player_status().await, None);
}

#[tokio::test]
async fn test_http_error_status_is_unsuccessful() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("00\r\n"))
        .mount(&server)
        .await;

    let outcome = client.send_command("STOP").await;
    assert!(!outcome.success);
    assert_eq!(outcome.response_code, None);
}

#[tokio::test]
async fn test_slow_player_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("00\r\n")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = TransportConfig::with_timeout(Duration::from_millis(100));
    let client = PlayerClient::new(&host_of(&server), &config).unwrap();

    assert!(!client.stop().await);
}

// ── Status ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_player_status_combines_both_queries() {
    let (server, client) = setup().await;
    mount_reply(&server, PST_BODY, "00, \r\n1,125,0\r\n").await;
    mount_reply(&server, SIMPLE_BODY, "00\r\nx,x,x,08,x,x,x,x,x,x,x,x,x,14:32\r\n").await;

    let status = client.get_player_status().await.unwrap();

    assert!(status.is_on);
    assert_eq!(status.device_mode, DeviceMode::Playing);
    assert_eq!(status.playback_state, PlaybackState::Playing);
    assert_eq!(status.position_seconds, 125);
    assert_eq!(status.speed_multiplier, 0);
    assert_eq!(status.clock_time.as_deref(), Some("14:32"));
    assert_eq!(status.raw_pst.as_deref(), Some("1,125,0"));
    assert_eq!(client.is_tray_open().await, Some(false));

    let summary = client.play_status().await;
    assert_eq!(summary.state, PlayStatusKind::Playing);
    assert_eq!(summary.position, 125);
}

#[tokio::test]
async fn test_player_status_absent_when_one_query_fails() {
    let (server, client) = setup().await;
    mount_reply(&server, PST_BODY, "00\r\n1,125,0\r\n").await;
    mount_reply(&server, SIMPLE_BODY, "01\r\nx,x,x,08,x,x,x,x,x,x,x,x,x,14:32\r\n").await;

    assert_eq!(client.get_player_status().await, None);
    assert_eq!(client.is_tray_open().await, None);
    assert_eq!(client.play_status().await.state, PlayStatusKind::Error);
}

#[tokio::test]
async fn test_player_status_absent_without_data_lines() {
    let (server, client) = setup().await;
    mount_reply(&server, PST_BODY, "00\r\n\r\n").await;
    mount_reply(&server, SIMPLE_BODY, "00\r\nx,x,x,01,x,x,x,x,x,x,x,x,x,\r\n").await;

    assert_eq!(client.get_player_status().await, None);
}

#[tokio::test]
async fn test_tray_open_status() {
    let (server, client) = setup().await;
    mount_reply(&server, PST_BODY, "00\r\n0,0,0\r\n").await;
    mount_reply(&server, SIMPLE_BODY, "00\r\n0,0,0,01,0,0,0,0,0,0,0,0,0,\r\n").await;

    assert_eq!(client.is_tray_open().await, Some(true));
}

#[tokio::test]
async fn test_status_queries_are_sequential_pst_first() {
    let (server, client) = setup().await;
    mount_reply(&server, PST_BODY, "00\r\n0,0,0\r\n").await;
    mount_reply(&server, SIMPLE_BODY, "00\r\n0,0,0,07,0,0,0,0,0,0,0,0,0,\r\n").await;

    let status = client.get_player_status().await.unwrap();
    assert!(!status.is_on);

    let received = server.received_requests().await.unwrap();
    let bodies: Vec<String> = received
        .iter()
        .map(|req| String::from_utf8_lossy(&req.body).into_owned())
        .collect();
    assert_eq!(bodies, vec![PST_BODY.to_owned(), SIMPLE_BODY.to_owned()]);
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn test_invalid_hosts_are_rejected() {
    for host in ["http://10.0.0.2", "10.0.0.2/path", ""] {
        let err = PlayerClient::new(host, &TransportConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidHost { .. }), "{host:?}: {err}");
        assert!(err.is_config());
    }
}

#[test]
fn test_with_transport_keeps_host() {
    let transport = Transport::with_client(reqwest::Client::new(), "10.0.0.2:8080").unwrap();
    let client = PlayerClient::with_transport(transport);
    assert_eq!(client.host(), "10.0.0.2:8080");
}

// ── Error classification ────────────────────────────────────────────

#[tokio::test]
async fn test_transport_errors_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let slow = Error::from(http.post(server.uri()).send().await.unwrap_err());
    assert!(slow.is_timeout(), "{slow}");
    assert!(!slow.is_config());

    let refused = Error::from(http.post("http://127.0.0.1:1/").send().await.unwrap_err());
    assert!(refused.is_connect(), "{refused}");
    assert!(!refused.is_timeout());

    let status = Error::HttpStatus { status: 500 };
    assert!(!status.is_timeout() && !status.is_connect() && !status.is_config());
}
