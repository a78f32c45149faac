//! Output format helpers for CLI commands.

use crate::CliOutput;
use crate::error::ExitCode;
use clap::{Args, ValueEnum};
use cinema_tickets_shared::ErrorEnvelope;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
    /// Line-delimited JSON (NDJSON) output.
    Ndjson,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
    /// Emit structured purchase logs and debug traces on stderr.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Output mode derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub format: OutputFormat,
    pub verbose: bool,
}

impl OutputMode {
    /// Build output mode from CLI flags.
    #[must_use]
    pub fn from_args(args: &OutputArgs) -> Self {
        Self {
            format: args.output.unwrap_or(OutputFormat::Text),
            verbose: args.verbose,
        }
    }

    /// Returns true when JSON output is requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Returns true when NDJSON output is requested.
    #[must_use]
    pub const fn is_ndjson(self) -> bool {
        matches!(self.format, OutputFormat::Ndjson)
    }
}

/// One-line NDJSON summary record; `extra` object keys are merged in.
pub fn format_ndjson_summary(status: &str, kind: &str, extra: Option<serde_json::Value>) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert("type".to_string(), serde_json::Value::from("summary"));
    payload.insert("status".to_string(), serde_json::Value::from(status));
    payload.insert("kind".to_string(), serde_json::Value::from(kind));
    if let Some(serde_json::Value::Object(map)) = extra {
        payload.extend(map);
    }
    let mut out = serde_json::to_string(&serde_json::Value::Object(payload)).unwrap_or_else(|_| {
        "{\"type\":\"summary\",\"status\":\"error\",\"kind\":\"internal\"}".to_string()
    });
    out.push('\n');
    out
}

/// Render a structured error on stdout in the requested format.
pub fn format_error_output(mode: OutputMode, error: &ErrorEnvelope) -> CliOutput {
    let exit_code = ExitCode::for_envelope(error);
    let stdout = if mode.is_ndjson() {
        json_line(&serde_json::json!({
            "type": "error",
            "status": "error",
            "error": error,
        }))
    } else if mode.is_json() {
        let payload = serde_json::json!({
            "status": "error",
            "error": error,
        });
        serde_json::to_string_pretty(&payload).map_or_else(
            |_| format_error_text(error),
            |mut out| {
                out.push('\n');
                out
            },
        )
    } else {
        format_error_text(error)
    };

    CliOutput {
        stdout,
        stderr: String::new(),
        exit_code,
    }
}

fn json_line(value: &serde_json::Value) -> String {
    let mut out = serde_json::to_string(value).unwrap_or_else(|_| {
        "{\"type\":\"error\",\"status\":\"error\",\"error\":{\"code\":\"core:internal\"}}".to_string()
    });
    out.push('\n');
    out
}

fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = String::new();
    out.push_str("status: error\n");
    out.push_str(&format!("code: {}\n", error.code));
    out.push_str(&format!("message: {}\n", error.message));
    out.push_str(&format!("kind: {}\n", error.kind));

    if !error.metadata.is_empty() {
        out.push_str("meta:\n");
        for (key, value) in &error.metadata {
            out.push_str(&format!("  {key}: {value}\n"));
        }
    }

    out
}
