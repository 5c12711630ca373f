//! Integration tests for the `besthub` CLI binary.
//!
//! Argument parsing, help, completions and error mapping run without a
//! backend; the rest talk to a wiremock server through `--api-url`.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `besthub` binary with env isolation.
///
/// Clears all `BESTHUB_*` env vars and points config and cache
/// directories at `home` so tests never touch the user's real setup.
fn besthub_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("besthub");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("BESTHUB_PROFILE")
        .env_remove("BESTHUB_API_URL")
        .env_remove("BESTHUB_OUTPUT")
        .env_remove("BESTHUB_INSECURE")
        .env_remove("BESTHUB_TIMEOUT");
    cmd
}

fn offline_cmd() -> assert_cmd::Command {
    besthub_cmd(Path::new("/tmp/besthub-cli-test-nonexistent"))
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run `args` against `server` on a blocking thread, so the mock server
/// keeps serving while the binary runs.
async fn run_against(server: &MockServer, home: &Path, args: &[&str]) -> std::process::Output {
    let uri = server.uri();
    let mut cmd = besthub_cmd(home);
    cmd.args(["--api-url", uri.as_str(), "--timeout", "5"]).args(args);
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn mount_signed_in(server: &MockServer, role: &str) {
    Mock::given(method("GET"))
        .and(path("/api/auth/check-auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": { "_id": "u-1", "userName": "Ama", "email": "ama@example.com", "role": role },
        })))
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = offline_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    offline_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("data bundles")
            .and(predicate::str::contains("bundles"))
            .and(predicate::str::contains("wallet"))
            .and(predicate::str::contains("admin")),
    );
}

#[test]
fn test_version_flag() {
    offline_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("besthub"));
}

#[test]
fn test_admin_help_lists_screens() {
    offline_cmd().args(["admin", "--help"]).assert().success().stdout(
        predicate::str::contains("users")
            .and(predicate::str::contains("orders"))
            .and(predicate::str::contains("prices"))
            .and(predicate::str::contains("settings")),
    );
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    offline_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("besthub"));
}

#[test]
fn test_completions_zsh() {
    offline_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Argument validation ─────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = offline_cmd().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_network_is_rejected() {
    let output = offline_cmd()
        .args(["bundles", "list", "--network", "glo"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("glo"));
}

#[test]
fn test_bulk_status_needs_ids() {
    let output = offline_cmd()
        .args(["admin", "orders", "-n", "mtn", "bulk-status", "--status", "completed"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_profile_is_not_found() {
    let output = offline_cmd()
        .args(["--profile", "staging", "wallet", "balance"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("staging"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_is_under_config_home() {
    let home = tempfile::tempdir().unwrap();
    besthub_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_then_show_masks_secrets() {
    let home = tempfile::tempdir().unwrap();
    besthub_cmd(home.path())
        .args(["config", "set", "api-url", "https://api.example.com"])
        .assert()
        .success();
    besthub_cmd(home.path())
        .args(["config", "set", "token", "legacy-secret"])
        .assert()
        .success();
    besthub_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("https://api.example.com")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("legacy-secret").not()),
        );
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let output = besthub_cmd(home.path())
        .args(["config", "set", "colour", "blue"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Against a mocked backend ────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_session_has_its_own_diagnostic() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Unauthorised user!",
        })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let output = run_against(&server, home.path(), &["wallet", "balance"]).await;
    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(
        text.contains("session expired, run `besthub auth login`"),
        "unexpected output:\n{text}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wallet_balance_plain_output() {
    let server = MockServer::start().await;
    mount_signed_in(&server, "customer").await;
    Mock::given(method("GET"))
        .and(path("/api/shop/wallet/balance/u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "balance": 93.5 },
        })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let output = run_against(&server, home.path(), &["-o", "plain", "wallet", "balance"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "93.50");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bundles_list_plain_is_cheapest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/shop/products/bundles/network/mtn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "_id": "b2", "packageName": "MTN 2GB", "dataAmount": "2GB", "price": 11 },
                { "_id": "b1", "packageName": "MTN 1GB", "dataAmount": "1GB", "price": 6 },
            ],
        })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let output = run_against(
        &server,
        home.path(),
        &["-o", "plain", "bundles", "list", "--network", "mtn"],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    // Cheapest first by default
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "b1\nb2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_commands_refuse_non_admins() {
    let server = MockServer::start().await;
    mount_signed_in(&server, "agent").await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .expect(0)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let output = run_against(&server, home.path(), &["admin", "users", "list"]).await;
    assert_eq!(output.status.code(), Some(5), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bulk_status_without_network_is_a_usage_error() {
    let server = MockServer::start().await;
    mount_signed_in(&server, "admin").await;
    let home = tempfile::tempdir().unwrap();

    let output = run_against(
        &server,
        home.path(),
        &["-y", "admin", "orders", "bulk-status", "o1", "o2", "--status", "completed"],
    )
    .await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--network"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_zero_adjustment_is_refused_locally() {
    let server = MockServer::start().await;
    mount_signed_in(&server, "admin").await;
    let home = tempfile::tempdir().unwrap();

    // Zero is refused before any request is made.
    let output = run_against(
        &server,
        home.path(),
        &["-y", "admin", "wallets", "adjust", "u-2", "0", "-d", "correction"],
    )
    .await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("amount"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_orders_list_names_networks_that_failed() {
    let server = MockServer::start().await;
    mount_signed_in(&server, "admin").await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/mtn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "_id": "o1", "packageName": "MTN 1GB", "phoneNumber": "0241234567", "amount": 6, "status": "pending" },
            ],
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/telecel"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "message": "queue offline",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": [] })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let output = run_against(&server, home.path(), &["-o", "plain", "admin", "orders", "list"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "o1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Telecel orders could not be loaded"), "{stderr}");
    assert!(!stderr.contains("AirtelTigo"), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bulk_status_counts_distinct_orders() {
    let server = MockServer::start().await;
    mount_signed_in(&server, "admin").await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/mtn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "_id": "o1", "packageName": "MTN 1GB", "phoneNumber": "0241234567", "amount": 6, "status": "pending" },
                { "_id": "o2", "packageName": "MTN 2GB", "phoneNumber": "0247654321", "amount": 11, "status": "pending" },
            ],
        })))
        .mount(&server)
        .await;
    // No updatedCount in the reply
    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/mtn/bulk-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let output = run_against(
        &server,
        home.path(),
        &[
            "-y", "admin", "orders", "-n", "mtn", "bulk-status", "o1", "o2", "o1", "--status",
            "completed",
        ],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Updated 2 orders"), "{stderr}");
}
