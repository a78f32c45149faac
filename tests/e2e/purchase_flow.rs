//! Purchase flow E2E tests: domain rules through the `tickets` binary.

use cinema_tickets_domain::{
    PurchaseError, PurchasePolicy, TicketCategory, TicketCounts, validate_purchase,
};
use std::error::Error;
use std::io;
use std::process::Command;

fn counts(adult: u32, child: u32, infant: u32) -> TicketCounts {
    TicketCounts::from([
        (TicketCategory::Adult, adult),
        (TicketCategory::Child, child),
        (TicketCategory::Infant, infant),
    ])
}

fn run_quote_json(args: &[&str]) -> io::Result<String> {
    let output = Command::new(env!("CARGO_BIN_EXE_tickets"))
        .args(["--output", "json", "quote"])
        .args(args)
        .env_remove("TICKETS_MAX_PER_PURCHASE")
        .env_remove("TICKETS_INFANTS_REQUIRE_ADULT_LAP")
        .output()?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[test]
fn domain_rules_end_to_end() -> Result<(), Box<dyn Error>> {
    let policy = PurchasePolicy::default();

    let family = validate_purchase(&policy, 1, &counts(2, 1, 0))?;
    assert_eq!(family.totals().total_seats, 3);
    assert_eq!(family.totals().total_cost, 65);

    let single = validate_purchase(&policy, 1, &counts(1, 0, 0))?;
    assert_eq!(single.totals().total_seats, 1);

    assert_eq!(
        validate_purchase(&policy, 1, &counts(0, 1, 0)),
        Err(PurchaseError::MissingAdult)
    );
    assert_eq!(
        validate_purchase(&policy, 0, &counts(1, 0, 0)),
        Err(PurchaseError::InvalidAccountId { account_id: 0 })
    );
    assert_eq!(
        validate_purchase(&policy, 1, &counts(21, 0, 0)),
        Err(PurchaseError::TooManyTickets { total: 21, max: 20 })
    );
    assert_eq!(
        validate_purchase(&policy, 1, &counts(0, 0, 0)),
        Err(PurchaseError::ZeroTickets)
    );
    Ok(())
}

#[test]
fn quote_output_is_deterministic() -> io::Result<()> {
    let args = ["--account-id", "3", "--adult", "2", "--infant", "1"];
    let first = run_quote_json(&args)?;
    let second = run_quote_json(&args)?;

    assert_eq!(first, second, "quote output should be deterministic");
    let value: serde_json::Value = serde_json::from_str(first.trim()).map_err(io::Error::other)?;
    assert_eq!(
        value.pointer("/totals/totalCost").and_then(serde_json::Value::as_u64),
        Some(50)
    );
    assert_eq!(
        value.pointer("/totals/totalSeats").and_then(serde_json::Value::as_u64),
        Some(2)
    );
    Ok(())
}
