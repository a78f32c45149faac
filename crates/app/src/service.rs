//! Long-lived purchase service bound to its collaborators.

use crate::purchase_tickets::{
    PurchaseTicketsDeps, PurchaseTicketsInput, PurchaseTicketsOutput, purchase_tickets,
};
use crate::quote_purchase::{QuotePurchaseDeps, quote_purchase};
use cinema_tickets_domain::{PurchaseError, PurchasePolicy, TicketCounts};
use cinema_tickets_ports::{LoggerPort, PaymentPort, SeatReservationPort};
use std::sync::Arc;

/// Ticket service. Holds collaborators and policy only; no per-request state
/// survives between calls.
#[derive(Clone)]
pub struct TicketService {
    deps: PurchaseTicketsDeps,
}

impl TicketService {
    /// Build a service with the default policy and no logger.
    #[must_use]
    pub fn new(
        payment: Arc<dyn PaymentPort>,
        reservation: Arc<dyn SeatReservationPort>,
    ) -> Self {
        Self {
            deps: PurchaseTicketsDeps {
                payment,
                reservation,
                logger: None,
                policy: PurchasePolicy::default(),
            },
        }
    }

    /// Replace the rule parameters.
    #[must_use]
    pub fn with_policy(mut self, policy: PurchasePolicy) -> Self {
        self.deps.policy = policy;
        self
    }

    /// Attach a structured logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn LoggerPort>) -> Self {
        self.deps.logger = Some(logger);
        self
    }

    /// Active rule parameters.
    #[must_use]
    pub const fn policy(&self) -> PurchasePolicy {
        self.deps.policy
    }

    /// Validate, charge, and reserve.
    ///
    /// # Errors
    ///
    /// Returns the first failing purchase rule; collaborators are untouched.
    pub fn purchase_tickets(
        &self,
        account_id: i64,
        tickets: &TicketCounts,
    ) -> Result<PurchaseTicketsOutput, PurchaseError> {
        let input = PurchaseTicketsInput {
            account_id,
            tickets: tickets.clone(),
        };
        purchase_tickets(&self.deps, &input)
    }

    /// Validate and price without side effects.
    ///
    /// # Errors
    ///
    /// Returns the first failing purchase rule.
    pub fn quote(
        &self,
        account_id: i64,
        tickets: &TicketCounts,
    ) -> Result<PurchaseTicketsOutput, PurchaseError> {
        let deps = QuotePurchaseDeps {
            logger: self.deps.logger.clone(),
            policy: self.deps.policy,
        };
        let input = PurchaseTicketsInput {
            account_id,
            tickets: tickets.clone(),
        };
        quote_purchase(&deps, &input)
    }
}

impl std::fmt::Debug for TicketService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TicketService")
            .field("policy", &self.deps.policy)
            .field("has_logger", &self.deps.logger.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_tickets_domain::TicketCategory;
    use cinema_tickets_ports::AccountId;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Default)]
    struct Counter {
        charged: AtomicU64,
        reserved: AtomicU64,
    }

    impl PaymentPort for Counter {
        fn make_payment(&self, _account_id: AccountId, amount: u64) {
            self.charged.fetch_add(amount, Ordering::SeqCst);
        }
    }

    impl SeatReservationPort for Counter {
        fn reserve_seats(&self, _account_id: AccountId, seat_count: u64) {
            self.reserved.fetch_add(seat_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn consecutive_purchases_do_not_share_state() -> Result<(), PurchaseError> {
        let counter = Arc::new(Counter::default());
        let service = TicketService::new(counter.clone(), counter.clone());

        service.purchase_tickets(1, &TicketCounts::from([(TicketCategory::Adult, 2)]))?;
        let second =
            service.purchase_tickets(1, &TicketCounts::from([(TicketCategory::Adult, 1)]))?;

        assert_eq!(second.totals.total_cost, 25);
        assert_eq!(counter.charged.load(Ordering::SeqCst), 75);
        assert_eq!(counter.reserved.load(Ordering::SeqCst), 3);
        Ok(())
    }

    #[test]
    fn quote_has_no_side_effects() -> Result<(), PurchaseError> {
        let counter = Arc::new(Counter::default());
        let service = TicketService::new(counter.clone(), counter.clone());

        let quote = service.quote(1, &TicketCounts::from([(TicketCategory::Adult, 4)]))?;

        assert_eq!(quote.totals.total_cost, 100);
        assert_eq!(counter.charged.load(Ordering::SeqCst), 0);
        assert_eq!(counter.reserved.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[test]
    fn with_policy_replaces_rules() {
        let counter = Arc::new(Counter::default());
        let service = TicketService::new(counter.clone(), counter).with_policy(PurchasePolicy {
            max_tickets: 20,
            infants_require_adult_lap: true,
        });

        let result = service.purchase_tickets(
            1,
            &TicketCounts::from([(TicketCategory::Adult, 1), (TicketCategory::Infant, 2)]),
        );

        assert_eq!(
            result,
            Err(PurchaseError::InfantWithoutLap {
                infants: 2,
                adults: 1
            })
        );
        assert!(service.policy().infants_require_adult_lap);
    }
}
