//! Payment and seat reservation adapters that record each call as a log event.
//!
//! The venue's real payment gateway and seating system sit outside this
//! workspace; these adapters stand in for them in the CLI and always succeed.

use cinema_tickets_ports::{AccountId, LogFields, LoggerPort, PaymentPort, SeatReservationPort};
use serde_json::json;
use std::sync::Arc;

/// Payment adapter that logs each charge.
#[derive(Clone, Default)]
pub struct LoggingPaymentService {
    logger: Option<Arc<dyn LoggerPort>>,
}

impl LoggingPaymentService {
    /// Create a payment adapter emitting events through `logger`.
    #[must_use]
    pub fn new(logger: Option<Arc<dyn LoggerPort>>) -> Self {
        Self { logger }
    }
}

impl PaymentPort for LoggingPaymentService {
    fn make_payment(&self, account_id: AccountId, amount: u64) {
        tracing::info!(account_id = account_id.get(), amount, "payment taken");
        if let Some(logger) = self.logger.as_ref() {
            let mut fields = LogFields::new();
            fields.insert("accountId".into(), json!(account_id.get()));
            fields.insert("amount".into(), json!(amount));
            logger.info("tickets.payment.charged", "payment taken", Some(fields));
        }
    }
}

/// Seat reservation adapter that logs each reservation.
#[derive(Clone, Default)]
pub struct LoggingSeatReservationService {
    logger: Option<Arc<dyn LoggerPort>>,
}

impl LoggingSeatReservationService {
    /// Create a reservation adapter emitting events through `logger`.
    #[must_use]
    pub fn new(logger: Option<Arc<dyn LoggerPort>>) -> Self {
        Self { logger }
    }
}

impl SeatReservationPort for LoggingSeatReservationService {
    fn reserve_seats(&self, account_id: AccountId, seat_count: u64) {
        tracing::info!(account_id = account_id.get(), seat_count, "seats reserved");
        if let Some(logger) = self.logger.as_ref() {
            let mut fields = LogFields::new();
            fields.insert("accountId".into(), json!(account_id.get()));
            fields.insert("seatCount".into(), json!(seat_count));
            logger.info("tickets.seats.reserved", "seats reserved", Some(fields));
        }
    }
}
