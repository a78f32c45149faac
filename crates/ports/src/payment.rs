//! Payment collaborator contract.

use cinema_tickets_domain::AccountId;

/// Charges an account for an admissible purchase.
///
/// Implementations are assumed to always succeed; there is no error channel.
pub trait PaymentPort: Send + Sync {
    /// Charge `amount` to `account_id`.
    fn make_payment(&self, account_id: AccountId, amount: u64);
}
