//! CLI integration tests.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const SCOPED_ENV: &[&str] = &["TICKETS_MAX_PER_PURCHASE", "TICKETS_INFANTS_REQUIRE_ADULT_LAP"];

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tickets"));
    for key in SCOPED_ENV {
        command.env_remove(key);
    }
    command.env_remove("RUST_LOG");
    command
}

fn run_cli(args: &[&str]) -> std::io::Result<Output> {
    cli().args(args).output()
}

fn run_cli_with_stdin(args: &[&str], stdin: &str) -> std::io::Result<Output> {
    let mut child = cli()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut pipe) = child.stdin.take() {
        pipe.write_all(stdin.as_bytes())?;
    }
    child.wait_with_output()
}

fn fixture_path(relative: &str) -> std::path::PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map_or_else(|| manifest_dir.to_path_buf(), Path::to_path_buf)
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn parse_stdout(output: &Output) -> std::io::Result<serde_json::Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).map_err(std::io::Error::other)
}

#[test]
fn cli_version_runs() -> std::io::Result<()> {
    let output = run_cli(&["--version"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.starts_with("tickets "));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn purchase_prints_totals() -> std::io::Result<()> {
    let output = run_cli(&["purchase", "--account-id", "1", "--adult", "2", "--child", "1"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "purchase failed: {stderr}");
    assert!(stdout.contains("status: ok"));
    assert!(stdout.contains("totalCost: 65"));
    assert!(stdout.contains("seats: 3"));
    Ok(())
}

#[test]
fn purchase_without_adult_is_rejected() -> std::io::Result<()> {
    let output = run_cli(&["purchase", "--account-id", "1", "--child", "1"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("status: error"));
    assert!(stdout.contains("code: purchase:missing_adult"));
    Ok(())
}

#[test]
fn invalid_account_is_rejected_as_json() -> std::io::Result<()> {
    let output = run_cli(&[
        "--output",
        "json",
        "purchase",
        "--account-id",
        "0",
        "--adult",
        "1",
    ])?;

    assert_eq!(output.status.code(), Some(2));
    let value = parse_stdout(&output)?;
    assert_eq!(
        value.pointer("/error/code/code").and_then(|v| v.as_str()),
        Some("invalid_account_id")
    );
    Ok(())
}

#[test]
fn too_many_tickets_is_rejected() -> std::io::Result<()> {
    let output = run_cli(&["quote", "--account-id", "1", "--adult", "21"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("code: purchase:too_many_tickets"));
    Ok(())
}

#[test]
fn env_override_raises_the_limit() -> std::io::Result<()> {
    let output = cli()
        .args(["quote", "--account-id", "1", "--adult", "21"])
        .env("TICKETS_MAX_PER_PURCHASE", "25")
        .output()?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "quote failed: {stdout}");
    assert!(stdout.contains("totalCost: 525"));
    Ok(())
}

#[test]
fn purchase_reads_request_from_stdin() -> std::io::Result<()> {
    let request = std::fs::read_to_string(fixture_path("requests/purchase.family.json"))?;
    let output = run_cli_with_stdin(&["--output", "ndjson", "purchase", "--stdin"], &request)?;

    assert!(output.status.success());
    let value = parse_stdout(&output)?;
    assert_eq!(value.get("type").and_then(|v| v.as_str()), Some("summary"));
    assert_eq!(value.get("kind").and_then(|v| v.as_str()), Some("purchase"));
    assert_eq!(value.get("accountId").and_then(serde_json::Value::as_u64), Some(42));
    assert_eq!(
        value.pointer("/totals/totalSeats").and_then(serde_json::Value::as_u64),
        Some(3)
    );
    Ok(())
}

#[test]
fn malformed_stdin_is_invalid_input() -> std::io::Result<()> {
    let output = run_cli_with_stdin(&["purchase", "--stdin"], "{\"accountId\":")?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn config_file_policy_applies_to_purchase() -> std::io::Result<()> {
    let path = fixture_path("config/ticketing-config.valid.json");
    let path = path.to_string_lossy();
    let output = run_cli(&[
        "purchase",
        "--account-id",
        "1",
        "--adult",
        "1",
        "--infant",
        "2",
        "--config",
        path.as_ref(),
    ])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout.contains("code: purchase:infant_without_lap"));
    Ok(())
}

#[test]
fn config_validate_accepts_toml_fixture() -> std::io::Result<()> {
    let path = fixture_path("config/ticketing-config.valid.toml");
    let output = run_cli(&["config", "validate", "--path", path.to_string_lossy().as_ref()])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("config: ok"));
    Ok(())
}

#[test]
fn config_validate_rejects_out_of_range_limit() -> std::io::Result<()> {
    let path = fixture_path("config/ticketing-config.invalid-limit.json");
    let output = run_cli(&["config", "validate", "--path", path.to_string_lossy().as_ref()])?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn missing_config_file_exits_with_io_code() -> std::io::Result<()> {
    let path = fixture_path("config/missing.json");
    let output = run_cli(&["config", "show", "--path", path.to_string_lossy().as_ref()])?;

    assert_eq!(output.status.code(), Some(3));
    Ok(())
}

#[test]
fn config_show_reports_defaults_as_json() -> std::io::Result<()> {
    let output = run_cli(&["--output", "json", "config", "show"])?;

    assert!(output.status.success());
    let value = parse_stdout(&output)?;
    assert_eq!(
        value
            .pointer("/effectiveConfig/purchase/maxTicketsPerPurchase")
            .and_then(serde_json::Value::as_u64),
        Some(20)
    );
    Ok(())
}

#[test]
fn info_runs() -> std::io::Result<()> {
    let output = run_cli(&["info"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("status: ok"));
    assert!(stdout.contains("prices: ADULT=25 CHILD=15 INFANT=0"));
    Ok(())
}

#[test]
fn verbose_purchase_logs_json_events_to_stderr() -> std::io::Result<()> {
    let output = run_cli(&["--verbose", "purchase", "--account-id", "7", "--adult", "1"])?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.contains("\"event\":\"tickets.purchase.completed\""));
    assert!(stderr.contains("\"event\":\"tickets.payment.charged\""));
    Ok(())
}
