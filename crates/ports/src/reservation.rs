//! Seat reservation collaborator contract.

use cinema_tickets_domain::AccountId;

/// Reserves seats for an admissible purchase.
///
/// Implementations are assumed to always succeed; there is no error channel.
pub trait SeatReservationPort: Send + Sync {
    /// Reserve `seat_count` seats for `account_id`.
    fn reserve_seats(&self, account_id: AccountId, seat_count: u64);
}
