//! Validate a ticket purchase, then take payment and reserve seats.

use crate::log_fields;
use cinema_tickets_domain::{
    PurchaseError, PurchasePolicy, PurchaseTotals, TicketCounts, validate_purchase,
};
use cinema_tickets_ports::{LoggerPort, PaymentPort, SeatReservationPort};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Input payload for a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PurchaseTicketsInput {
    /// Raw account identifier; must be at least 1.
    pub account_id: i64,
    /// Requested quantity per category.
    #[serde(default)]
    pub tickets: TicketCounts,
}

/// Outcome of an accepted purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTicketsOutput {
    /// Charged account.
    pub account_id: u64,
    /// Computed totals; `total_cost` was charged and `total_seats` reserved.
    pub totals: PurchaseTotals,
}

/// Dependencies required by purchase-tickets.
#[derive(Clone)]
pub struct PurchaseTicketsDeps {
    /// Payment collaborator.
    pub payment: Arc<dyn PaymentPort>,
    /// Seat reservation collaborator.
    pub reservation: Arc<dyn SeatReservationPort>,
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
    /// Rule parameters.
    pub policy: PurchasePolicy,
}

/// Validate the request and, only when every rule passes, charge the total
/// cost and then reserve the seats.
///
/// A rejected purchase invokes neither collaborator.
#[tracing::instrument(
    name = "purchase_tickets",
    skip_all,
    fields(account_id = input.account_id)
)]
pub fn purchase_tickets(
    deps: &PurchaseTicketsDeps,
    input: &PurchaseTicketsInput,
) -> Result<PurchaseTicketsOutput, PurchaseError> {
    if let Some(logger) = deps.logger.as_ref() {
        logger.info(
            "tickets.purchase.start",
            "Ticket purchase started",
            Some(log_fields::start(input.account_id, &input.tickets)),
        );
    }

    let purchase = match validate_purchase(&deps.policy, input.account_id, &input.tickets) {
        Ok(purchase) => purchase,
        Err(error) => {
            tracing::warn!(code = %error.error_code(), "purchase rejected: {error}");
            if let Some(logger) = deps.logger.as_ref() {
                log_fields::log_rejected(
                    logger.as_ref(),
                    "tickets.purchase.rejected",
                    "Ticket purchase rejected",
                    input.account_id,
                    &input.tickets,
                    &error,
                );
            }
            return Err(error);
        },
    };

    let account_id = purchase.account_id();
    let totals = purchase.totals();
    deps.payment.make_payment(account_id, totals.total_cost);
    deps.reservation.reserve_seats(account_id, totals.total_seats);

    tracing::debug!(
        total_cost = totals.total_cost,
        total_seats = totals.total_seats,
        "purchase settled"
    );
    if let Some(logger) = deps.logger.as_ref() {
        logger.info(
            "tickets.purchase.completed",
            "Ticket purchase completed",
            Some(log_fields::completed(
                input.account_id,
                &input.tickets,
                &totals,
            )),
        );
    }

    Ok(PurchaseTicketsOutput {
        account_id: account_id.get(),
        totals,
    })
}
