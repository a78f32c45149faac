//! Price a purchase without charging or reserving.

use crate::log_fields;
use crate::purchase_tickets::{PurchaseTicketsInput, PurchaseTicketsOutput};
use cinema_tickets_domain::{PurchaseError, PurchasePolicy, validate_purchase};
use cinema_tickets_ports::LoggerPort;
use std::sync::Arc;

/// Dependencies required by quote-purchase.
#[derive(Clone, Default)]
pub struct QuotePurchaseDeps {
    /// Optional logger.
    pub logger: Option<Arc<dyn LoggerPort>>,
    /// Rule parameters.
    pub policy: PurchasePolicy,
}

/// Run the purchase rules and return the totals a purchase would settle.
#[tracing::instrument(
    name = "quote_purchase",
    skip_all,
    fields(account_id = input.account_id)
)]
pub fn quote_purchase(
    deps: &QuotePurchaseDeps,
    input: &PurchaseTicketsInput,
) -> Result<PurchaseTicketsOutput, PurchaseError> {
    match validate_purchase(&deps.policy, input.account_id, &input.tickets) {
        Ok(purchase) => {
            let totals = purchase.totals();
            if let Some(logger) = deps.logger.as_ref() {
                logger.debug(
                    "tickets.quote.completed",
                    "Ticket quote computed",
                    Some(log_fields::completed(
                        input.account_id,
                        &input.tickets,
                        &totals,
                    )),
                );
            }
            Ok(PurchaseTicketsOutput {
                account_id: purchase.account_id().get(),
                totals,
            })
        },
        Err(error) => {
            if let Some(logger) = deps.logger.as_ref() {
                log_fields::log_rejected(
                    logger.as_ref(),
                    "tickets.quote.rejected",
                    "Ticket quote rejected",
                    input.account_id,
                    &input.tickets,
                    &error,
                );
            }
            Err(error)
        },
    }
}
