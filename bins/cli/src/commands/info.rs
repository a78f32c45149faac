//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use cinema_tickets_app::app_crate_version;
use cinema_tickets_core::{BuildInfo, build_info};
use cinema_tickets_domain::{DEFAULT_MAX_TICKETS_PER_PURCHASE, TicketCategory};

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let build = build_info();
    let app_version = app_crate_version();

    let stdout = if mode.is_ndjson() {
        let mut out = serde_json::to_string(&info_payload(&build, app_version, "summary"))?;
        out.push('\n');
        out
    } else if mode.is_json() {
        let mut out = serde_json::to_string_pretty(&info_payload(&build, app_version, "info"))?;
        out.push('\n');
        out
    } else {
        format_info_text(&build, app_version)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn format_info_text(build: &BuildInfo, app_version: &str) -> String {
    let prices = TicketCategory::ALL
        .iter()
        .map(|category| format!("{}={}", category.as_str(), category.price()))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "status: ok\nname: {}\nversion: {}\napp: {}\nrust: {}\nplatform: {}\nprofile: {}\ngit: {}\nprices: {prices}\nmaxTicketsDefault: {DEFAULT_MAX_TICKETS_PER_PURCHASE}\n",
        build.name,
        build.version,
        app_version,
        build.rust_version,
        build.platform(),
        build.profile,
        build.git_hash.unwrap_or("none"),
    )
}

fn info_payload(build: &BuildInfo, app_version: &str, record_type: &str) -> serde_json::Value {
    let prices: serde_json::Map<String, serde_json::Value> = TicketCategory::ALL
        .iter()
        .map(|category| {
            (
                category.as_str().to_string(),
                serde_json::Value::from(category.price()),
            )
        })
        .collect();
    serde_json::json!({
        "type": record_type,
        "status": "ok",
        "kind": "info",
        "build": {
            "name": build.name,
            "version": build.version,
            "appVersion": app_version,
            "rustVersion": build.rust_version,
            "platform": build.platform(),
            "profile": build.profile,
            "gitHash": build.git_hash,
        },
        "prices": prices,
        "maxTicketsDefault": DEFAULT_MAX_TICKETS_PER_PURCHASE,
    })
}
