//! Config loading helpers (env + file + overrides).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{TicketingConfig, TicketingEnv, ValidatedTicketingConfig, apply_env_overrides};
use cinema_tickets_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

/// Load the ticketing config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`TicketingEnv`)
/// - overrides JSON (partial config)
/// - config JSON (file content)
/// - defaults (`TicketingConfig::default()`)
pub fn load_ticketing_config_from_sources(
    config_json: Option<&str>,
    overrides_json: Option<&str>,
    env: &TicketingEnv,
) -> Result<ValidatedTicketingConfig, ErrorEnvelope> {
    let mut config = match config_json {
        None => TicketingConfig::default(),
        Some(input) => parse_config_unvalidated(input, ConfigFormat::Json)?,
    };

    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        apply_overrides(&mut config, &overrides);
    }

    // env is applied last and also validates the resulting config.
    apply_env_overrides(config, env)
}

/// Load the ticketing config from an optional file path (`.json` or `.toml`).
pub fn load_ticketing_config_from_path(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
    env: &TicketingEnv,
) -> Result<ValidatedTicketingConfig, ErrorEnvelope> {
    let mut config = match config_path {
        None => TicketingConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            tracing::debug!(path = %path.display(), ?format, "loaded config file");
            parse_config_unvalidated(&config_text, format)?
        },
    };

    if let Some(input) = overrides_json {
        let overrides = parse_overrides_json(input)?;
        apply_overrides(&mut config, &overrides);
    }

    apply_env_overrides(config, env)
}

/// Load the ticketing config from std env and an optional file path.
pub fn load_ticketing_config_std_env(
    config_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<ValidatedTicketingConfig, ErrorEnvelope> {
    let env = TicketingEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    if !env.is_empty() {
        tracing::debug!(?env, "applying env overrides");
    }
    load_ticketing_config_from_path(config_path, overrides_json, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &TicketingConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &TicketingConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<TicketingConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn parse_overrides_json(input: &str) -> Result<TicketingConfigOverrides, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid overrides JSON: {error}"),
        )
        .with_metadata("source", "overrides")
    })
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct TicketingConfigOverrides {
    version: Option<u32>,
    purchase: PurchaseRulesOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
struct PurchaseRulesOverrides {
    max_tickets_per_purchase: Option<u32>,
    infants_require_adult_lap: Option<bool>,
}

fn apply_overrides(config: &mut TicketingConfig, overrides: &TicketingConfigOverrides) {
    if let Some(version) = overrides.version {
        config.version = version;
    }
    let purchase = &overrides.purchase;
    if let Some(value) = purchase.max_tickets_per_purchase {
        config.purchase.max_tickets_per_purchase = value;
    }
    if let Some(value) = purchase.infants_require_adult_lap {
        config.purchase.infants_require_adult_lap = value;
    }
}
