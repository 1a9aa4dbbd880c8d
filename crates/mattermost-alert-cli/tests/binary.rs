//! Process-level tests for the `mattermost-alert` executable
//!
//! These run the real binary and check the platform contract: exit codes,
//! the stderr line format and what reaches the webhook.

use assert_cmd::assert::{Assert, OutputAssertExt};
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn command() -> Command {
    let mut cmd = Command::cargo_bin("mattermost-alert").unwrap();
    cmd.env_remove("MATTERMOST_ALERT_DEBUG")
        .env_remove("MATTERMOST_ALERT_TIMEOUT_SECONDS")
        .env_remove("MATTERMOST_ALERT_USER_AGENT")
        .env_remove("RUST_LOG");
    cmd
}

fn error_lines(stderr: &[u8]) -> usize {
    String::from_utf8_lossy(stderr)
        .lines()
        .filter(|line| line.starts_with("[mattermost-alert] [error]"))
        .count()
}

/// Run the binary off the async runtime so the mock server keeps serving
async fn run(mut cmd: Command) -> Assert {
    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();
    output.assert()
}

#[test]
fn test_missing_execute_flag_is_usage_error() {
    command()
        .assert()
        .failure()
        .code(1)
        .stderr("[mattermost-alert] [error] unsupported execution mode (expected --execute flag)\n");
}

#[test]
fn test_wrong_flag_is_usage_error() {
    command()
        .arg("--setup")
        .write_stdin("{}")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unsupported execution mode"));
}

#[test]
fn test_double_dash_before_execute_flag_is_usage_error() {
    command()
        .args(["--", "--execute"])
        .write_stdin("{}")
        .assert()
        .failure()
        .code(1)
        .stderr("[mattermost-alert] [error] unsupported execution mode (expected --execute flag)\n");
}

#[test]
fn test_malformed_payload_fails() {
    let assert = command()
        .arg("--execute")
        .write_stdin("this is not json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with(
            "[mattermost-alert] [error] unhandled exception: Parse error:",
        ));

    assert_eq!(error_lines(&assert.get_output().stderr), 1);
}

#[test]
fn test_missing_webhook_fails_with_one_line() {
    let assert = command()
        .arg("--execute")
        .write_stdin(json!({"search_name": "CPU High", "configuration": {}}).to_string())
        .assert()
        .failure()
        .code(1)
        .stderr(
            "[mattermost-alert] [error] unhandled exception: Configuration error: webhook_url must be set\n",
        );

    assert_eq!(error_lines(&assert.get_output().stderr), 1);
}

#[test]
fn test_invalid_timeout_setting_fails() {
    command()
        .arg("--execute")
        .env("MATTERMOST_ALERT_TIMEOUT_SECONDS", "soon")
        .write_stdin("{}")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unhandled exception: Settings error:"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_successful_delivery_exits_zero() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hooks/abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cmd = command();
    cmd.arg("--execute").write_stdin(
        json!({
            "search_name": "CPU High",
            "results_link": "http://x/1",
            "result": {"host": "a1"},
            "configuration": {
                "webhook_url": format!("{}/hooks/abc", mock_server.uri()),
                "severity": "warning",
                "fields": "host"
            }
        })
        .to_string(),
    );

    run(cmd)
        .await
        .success()
        .stderr("[mattermost-alert] [info] alert sent successfully\n");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let text = body["text"].as_str().unwrap();
    assert_eq!(body["channel"], "splunk-alerts");
    assert!(text.contains("⚠️ Alert: **CPU High**"));
    assert!(text.contains("[View in Splunk](http://x/1)"));
    assert!(text.contains("| host       | a1      |"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_500_exits_one_with_single_error_line() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut cmd = command();
    cmd.arg("--execute").write_stdin(
        json!({"configuration": {"webhook_url": mock_server.uri()}}).to_string(),
    );

    let assert = run(cmd).await.failure().code(1).stderr(
        "[mattermost-alert] [error] unhandled exception: Delivery error: webhook responded with HTTP status 500\n",
    );

    assert_eq!(error_lines(&assert.get_output().stderr), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_debug_toggle_emits_debug_lines() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut cmd = command();
    cmd.arg("--execute")
        .env("MATTERMOST_ALERT_DEBUG", "true")
        .write_stdin(json!({"configuration": {"webhook_url": mock_server.uri()}}).to_string());

    run(cmd)
        .await
        .success()
        .stderr(predicate::str::contains("[mattermost-alert] [--> debug <--] config: "))
        .stderr(predicate::str::ends_with(
            "[mattermost-alert] [info] alert sent successfully\n",
        ));
}
