//! Structured log field builders shared by the purchase use cases.

use cinema_tickets_domain::{PurchaseError, PurchaseTotals, TicketCounts};
use cinema_tickets_ports::{LogEvent, LogFields, LogLevel, LoggerPort};
use cinema_tickets_shared::ErrorEnvelope;
use serde_json::Value;

/// Account id plus requested quantities keyed by category name.
pub fn start(account_id: i64, tickets: &TicketCounts) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert("accountId".into(), Value::from(account_id));
    let counts = tickets
        .iter()
        .map(|(category, quantity)| (category.as_str().to_owned(), Value::from(*quantity)))
        .collect();
    fields.insert("tickets".into(), Value::Object(counts));
    fields
}

/// Start fields extended with total tickets, cost, and seats.
pub fn completed(account_id: i64, tickets: &TicketCounts, totals: &PurchaseTotals) -> LogFields {
    let mut fields = start(account_id, tickets);
    fields.insert("totalTickets".into(), Value::from(totals.total_tickets));
    fields.insert("totalCost".into(), Value::from(totals.total_cost));
    fields.insert("totalSeats".into(), Value::from(totals.total_seats));
    fields
}

/// Emit a warn-level rejection event carrying the error envelope.
pub fn log_rejected(
    logger: &dyn LoggerPort,
    event: &str,
    message: &str,
    account_id: i64,
    tickets: &TicketCounts,
    error: &PurchaseError,
) {
    let mut fields = start(account_id, tickets);
    fields.insert("errorCode".into(), Value::from(error.error_code().to_string()));
    fields.insert("errorKind".into(), Value::from(error.kind().to_string()));
    let envelope = ErrorEnvelope::from(error.clone());
    logger.log(LogEvent::new(event, LogLevel::Warn, message, Some(fields)).with_error(&envelope));
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_tickets_domain::{PurchasePolicy, TicketCategory, validate_purchase};
    use cinema_tickets_testkit::in_memory::MemoryLogger;
    use std::error::Error;

    fn family() -> TicketCounts {
        TicketCounts::from([(TicketCategory::Adult, 2), (TicketCategory::Child, 1)])
    }

    #[test]
    fn start_fields_key_quantities_by_category_name() {
        let fields = start(9, &family());

        assert_eq!(fields.get("accountId"), Some(&Value::from(9)));
        assert_eq!(
            fields.get("tickets").and_then(|tickets| tickets.get("ADULT")),
            Some(&Value::from(2))
        );
        assert!(!fields.contains_key("totalCost"));
    }

    #[test]
    fn completed_fields_carry_totals() -> Result<(), Box<dyn Error>> {
        let tickets = family();
        let purchase = validate_purchase(&PurchasePolicy::default(), 9, &tickets)?;
        let fields = completed(9, &tickets, &purchase.totals());

        assert_eq!(fields.get("totalTickets"), Some(&Value::from(3)));
        assert_eq!(fields.get("totalCost"), Some(&Value::from(65)));
        assert_eq!(fields.get("totalSeats"), Some(&Value::from(3)));
        assert!(fields.contains_key("tickets"));
        Ok(())
    }

    #[test]
    fn rejection_is_logged_at_warn_with_error_code() -> Result<(), Box<dyn Error>> {
        let logger = MemoryLogger::default();
        let tickets = TicketCounts::from([(TicketCategory::Child, 1)]);
        let error = validate_purchase(&PurchasePolicy::default(), 9, &tickets)
            .err()
            .ok_or_else(|| std::io::Error::other("expected rejection"))?;

        log_rejected(&logger, "tickets.test.rejected", "rejected", 9, &tickets, &error);

        let event = logger
            .find("tickets.test.rejected")
            .ok_or_else(|| std::io::Error::other("missing event"))?;
        assert_eq!(event.level, LogLevel::Warn);
        assert!(event.error.is_some());
        assert_eq!(
            event.fields.and_then(|fields| fields.get("errorCode").cloned()),
            Some(Value::from(error.error_code().to_string()))
        );
        Ok(())
    }
}
