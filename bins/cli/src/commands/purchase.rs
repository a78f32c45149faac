//! Purchase and quote command handlers.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error_output, format_ndjson_summary};
use cinema_tickets_adapters::{
    JsonLogger, LoggingPaymentService, LoggingSeatReservationService, StderrLogSink,
};
use cinema_tickets_app::{PurchaseTicketsInput, PurchaseTicketsOutput, TicketService};
use cinema_tickets_config::load_ticketing_config_std_env;
use cinema_tickets_domain::{PurchaseError, TicketCategory, TicketCounts};
use cinema_tickets_ports::{LogLevel, LoggerPort};
use cinema_tickets_shared::ErrorEnvelope;
use clap::Args;
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

/// Request and config flags shared by `purchase` and `quote`.
#[derive(Debug, Args)]
pub struct PurchaseArgs {
    /// Purchasing account (must be at least 1).
    #[arg(long, allow_negative_numbers = true, required_unless_present = "stdin")]
    pub account_id: Option<i64>,
    /// Adult tickets.
    #[arg(long)]
    pub adult: Option<u32>,
    /// Child tickets.
    #[arg(long)]
    pub child: Option<u32>,
    /// Infant tickets.
    #[arg(long)]
    pub infant: Option<u32>,
    /// Read `{"accountId":N,"tickets":{"ADULT":N}}` from stdin.
    #[arg(long, conflicts_with_all = ["account_id", "adult", "child", "infant"])]
    pub stdin: bool,
    /// Optional config file path (JSON/TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Optional JSON overrides applied on top of the config file.
    #[arg(long)]
    pub overrides_json: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Purchase,
    Quote,
}

impl Operation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Quote => "quote",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OperationReport<'a> {
    status: &'static str,
    operation: &'static str,
    tickets: &'a TicketCounts,
    #[serde(flatten)]
    result: PurchaseTicketsOutput,
}

/// Run a full purchase: validate, charge, then reserve.
pub fn run_purchase(mode: OutputMode, args: &PurchaseArgs) -> Result<CliOutput, CliError> {
    run_operation(mode, args, Operation::Purchase)
}

/// Validate and price a purchase without charging or reserving.
pub fn run_quote(mode: OutputMode, args: &PurchaseArgs) -> Result<CliOutput, CliError> {
    run_operation(mode, args, Operation::Quote)
}

fn run_operation(
    mode: OutputMode,
    args: &PurchaseArgs,
    operation: Operation,
) -> Result<CliOutput, CliError> {
    let input = if args.stdin {
        read_stdin_input()?
    } else {
        input_from_flags(args)?
    };
    let config = match load_ticketing_config_std_env(
        args.config.as_deref(),
        args.overrides_json.as_deref(),
    ) {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error)),
    };

    let logger = structured_logger(mode);
    let mut service = TicketService::new(
        Arc::new(LoggingPaymentService::new(logger.clone())),
        Arc::new(LoggingSeatReservationService::new(logger.clone())),
    )
    .with_policy(config.purchase_policy());
    if let Some(logger) = logger {
        service = service.with_logger(logger);
    }

    let result = match operation {
        Operation::Purchase => service.purchase_tickets(input.account_id, &input.tickets),
        Operation::Quote => service.quote(input.account_id, &input.tickets),
    };
    match result {
        Ok(output) => format_success(mode, operation, &input.tickets, output),
        Err(error) => Ok(rejected_output(mode, error)),
    }
}

fn structured_logger(mode: OutputMode) -> Option<Arc<dyn LoggerPort>> {
    mode.verbose.then(|| {
        Arc::new(JsonLogger::new(Arc::new(StderrLogSink)).with_min_level(LogLevel::Debug))
            as Arc<dyn LoggerPort>
    })
}

fn input_from_flags(args: &PurchaseArgs) -> Result<PurchaseTicketsInput, CliError> {
    let account_id = args
        .account_id
        .ok_or_else(|| CliError::InvalidInput("missing --account-id or --stdin".to_string()))?;
    let tickets = [
        (TicketCategory::Adult, args.adult),
        (TicketCategory::Child, args.child),
        (TicketCategory::Infant, args.infant),
    ]
    .into_iter()
    .filter_map(|(category, quantity)| quantity.map(|quantity| (category, quantity)))
    .collect();
    Ok(PurchaseTicketsInput {
        account_id,
        tickets,
    })
}

fn read_stdin_input() -> Result<PurchaseTicketsInput, CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    parse_request_json(&buf)
}

fn parse_request_json(input: &str) -> Result<PurchaseTicketsInput, CliError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CliError::InvalidInput("stdin request is empty".to_string()));
    }
    serde_json::from_str(trimmed)
        .map_err(|error| CliError::InvalidInput(format!("invalid purchase request: {error}")))
}

fn rejected_output(mode: OutputMode, error: PurchaseError) -> CliOutput {
    let envelope = ErrorEnvelope::from(error);
    format_error_output(mode, &envelope)
}

fn format_success(
    mode: OutputMode,
    operation: Operation,
    tickets: &TicketCounts,
    output: PurchaseTicketsOutput,
) -> Result<CliOutput, CliError> {
    let report = OperationReport {
        status: "ok",
        operation: operation.as_str(),
        tickets,
        result: output,
    };
    let stdout = if mode.is_ndjson() {
        format_ndjson_summary("ok", operation.as_str(), Some(serde_json::to_value(&report)?))
    } else if mode.is_json() {
        let mut out = serde_json::to_string_pretty(&report)?;
        out.push('\n');
        out
    } else {
        format_success_text(&report)
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn format_success_text(report: &OperationReport<'_>) -> String {
    let totals = report.result.totals;
    format!(
        "status: ok\noperation: {}\naccountId: {}\nadult: {}\nchild: {}\ninfant: {}\ntotalTickets: {}\ntotalCost: {}\nseats: {}\n",
        report.operation,
        report.result.account_id,
        totals.adult,
        totals.child,
        totals.infant,
        totals.total_tickets,
        totals.total_cost,
        totals.total_seats,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;

    fn text_mode() -> OutputMode {
        OutputMode {
            format: OutputFormat::Text,
            verbose: false,
        }
    }

    fn flags(account_id: i64, adult: Option<u32>, child: Option<u32>) -> PurchaseArgs {
        PurchaseArgs {
            account_id: Some(account_id),
            adult,
            child,
            infant: None,
            stdin: false,
            config: None,
            overrides_json: None,
        }
    }

    #[test]
    fn flags_only_include_supplied_categories() -> Result<(), CliError> {
        let input = input_from_flags(&flags(3, Some(2), None))?;
        assert_eq!(input.account_id, 3);
        assert_eq!(input.tickets, TicketCounts::from([(TicketCategory::Adult, 2)]));
        Ok(())
    }

    #[test]
    fn request_json_rejects_unknown_categories() {
        let result = parse_request_json(r#"{"accountId":1,"tickets":{"SENIOR":1}}"#);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));

        let empty = parse_request_json("  \n");
        assert!(matches!(empty, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn rejected_purchase_maps_to_invalid_input() {
        let output = rejected_output(text_mode(), PurchaseError::MissingAdult);
        assert_eq!(output.exit_code, ExitCode::InvalidInput);
        assert!(output.stdout.contains("code: purchase:missing_adult"));
    }

    #[test]
    fn success_text_reports_totals() -> Result<(), Box<dyn std::error::Error>> {
        let tickets = TicketCounts::from([(TicketCategory::Adult, 2), (TicketCategory::Child, 1)]);
        let service = TicketService::new(
            Arc::new(LoggingPaymentService::default()),
            Arc::new(LoggingSeatReservationService::default()),
        );
        let output = service.quote(1, &tickets)?;

        let rendered = format_success(text_mode(), Operation::Quote, &tickets, output)?;

        assert_eq!(rendered.exit_code, ExitCode::Ok);
        assert!(rendered.stdout.contains("operation: quote\n"));
        assert!(rendered.stdout.contains("totalCost: 65\n"));
        assert!(rendered.stdout.contains("seats: 3\n"));
        Ok(())
    }
}
