//! Integration tests for parsing config fixtures from the workspace testkit.

use cinema_tickets_config::{
    CURRENT_CONFIG_VERSION, TicketingEnv, load_ticketing_config_from_path,
    parse_ticketing_config_json, parse_ticketing_config_toml,
};
use cinema_tickets_shared::ErrorCode;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
        .join("crates")
        .join("testkit")
        .join("fixtures")
}

fn read_fixture(relative: &str) -> Result<String, Box<dyn Error>> {
    Ok(fs::read_to_string(fixtures_root().join(relative))?)
}

#[test]
fn json_and_toml_fixtures_agree() -> Result<(), Box<dyn Error>> {
    let json = parse_ticketing_config_json(&read_fixture("config/ticketing-config.valid.json")?)?;
    let toml = parse_ticketing_config_toml(&read_fixture("config/ticketing-config.valid.toml")?)?;

    assert_eq!(json.version, CURRENT_CONFIG_VERSION);
    assert_eq!(json.as_ref(), toml.as_ref());
    assert_eq!(json.purchase_policy().max_tickets, 25);
    assert!(json.purchase_policy().infants_require_adult_lap);
    Ok(())
}

#[test]
fn invalid_fixture_reports_limit_error() -> Result<(), Box<dyn Error>> {
    let contents = read_fixture("config/ticketing-config.invalid-limit.json")?;
    let error = parse_ticketing_config_json(&contents)
        .err()
        .ok_or_else(|| std::io::Error::other("expected validation error"))?;

    assert_eq!(error.code, ErrorCode::new("config", "invalid_limit"));
    assert_eq!(error.metadata.get("value").map(String::as_str), Some("500"));
    assert_eq!(error.metadata.get("max").map(String::as_str), Some("100"));
    Ok(())
}

#[test]
fn load_from_path_detects_format_by_extension() -> Result<(), Box<dyn Error>> {
    let path = fixtures_root().join("config/ticketing-config.valid.toml");
    let config = load_ticketing_config_from_path(Some(&path), None, &TicketingEnv::default())?;
    assert_eq!(config.purchase.max_tickets_per_purchase, 25);
    Ok(())
}
