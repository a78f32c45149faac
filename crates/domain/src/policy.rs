//! Purchase rules that vary per deployment.

/// Default upper bound on tickets in a single purchase.
pub const DEFAULT_MAX_TICKETS_PER_PURCHASE: u32 = 20;

/// Rule parameters applied by [`crate::validate_purchase`].
///
/// Prices are fixed by [`crate::TicketCategory::price`] and are not part of
/// the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchasePolicy {
    /// Inclusive maximum of tickets across all categories.
    pub max_tickets: u32,
    /// Reject purchases with more infants than adults.
    pub infants_require_adult_lap: bool,
}

impl Default for PurchasePolicy {
    fn default() -> Self {
        Self {
            max_tickets: DEFAULT_MAX_TICKETS_PER_PURCHASE,
            infants_require_adult_lap: false,
        }
    }
}
