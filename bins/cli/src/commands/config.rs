//! Config command handlers.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error_output, format_ndjson_summary};
use cinema_tickets_config::{
    TicketingEnv, ValidatedTicketingConfig, load_ticketing_config_from_path, to_pretty_json,
};
use cinema_tickets_shared::ErrorEnvelope;
use std::path::Path;

/// Print the effective config after file, overrides, and env are applied.
pub fn run_config_show(
    mode: OutputMode,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<CliOutput, CliError> {
    let env = match std_env() {
        Ok(env) => env,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    config_show_with_env(mode, &env, path, overrides_json)
}

/// Check that the effective config loads and validates.
pub fn run_config_validate(
    mode: OutputMode,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<CliOutput, CliError> {
    let env = match std_env() {
        Ok(env) => env,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    config_validate_with_env(mode, &env, path, overrides_json)
}

fn std_env() -> Result<TicketingEnv, ErrorEnvelope> {
    TicketingEnv::from_std_env().map_err(ErrorEnvelope::from)
}

fn load(
    env: &TicketingEnv,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<ValidatedTicketingConfig, ErrorEnvelope> {
    let config = load_ticketing_config_from_path(path, overrides_json, env)?;
    tracing::debug!(
        max_tickets = config.limits().max_tickets_per_purchase.get(),
        "effective config loaded"
    );
    Ok(config)
}

fn config_show_with_env(
    mode: OutputMode,
    env: &TicketingEnv,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<CliOutput, CliError> {
    let config = match load(env, path, overrides_json) {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    let config_json = match to_pretty_json(config.as_ref()) {
        Ok(json) => json,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };
    let config_value: serde_json::Value = serde_json::from_str(config_json.trim())?;

    let stdout = if mode.is_ndjson() {
        format_ndjson_summary(
            "ok",
            "config",
            Some(serde_json::json!({ "effectiveConfig": config_value })),
        )
    } else if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "configPath": path.map(|value| value.to_string_lossy().to_string()),
            "effectiveConfig": config_value,
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        let mut out = String::new();
        out.push_str("status: ok\nconfig:\n");
        out.push_str(&config_json);
        out
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn config_validate_with_env(
    mode: OutputMode,
    env: &TicketingEnv,
    path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<CliOutput, CliError> {
    if let Err(error) = load(env, path, overrides_json) {
        return Ok(format_error_output(mode, &error));
    }

    let stdout = if mode.is_ndjson() {
        format_ndjson_summary("ok", "config", None)
    } else if mode.is_json() {
        let payload = serde_json::json!({
            "status": "ok",
            "configPath": path.map(|value| value.to_string_lossy().to_string()),
        });
        let mut output = serde_json::to_string_pretty(&payload)?;
        output.push('\n');
        output
    } else {
        path.map_or_else(
            || "status: ok\nconfig: ok\n".to_string(),
            |path| format!("status: ok\nconfig: ok\npath: {}\n", path.to_string_lossy()),
        )
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
