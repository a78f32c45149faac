//! # cinema-tickets-app
//!
//! Application use cases for ticket purchases.
//! This crate depends on `ports`, `domain`, and `shared`.

mod log_fields;
pub mod purchase_tickets;
pub mod quote_purchase;
pub mod service;

pub use purchase_tickets::{
    PurchaseTicketsDeps, PurchaseTicketsInput, PurchaseTicketsOutput, purchase_tickets,
};
pub use quote_purchase::{QuotePurchaseDeps, quote_purchase};
pub use service::TicketService;

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_tickets_domain::domain_crate_version;
    use cinema_tickets_ports::ports_crate_version;
    use cinema_tickets_shared::shared_crate_version;

    #[test]
    fn app_crate_compiles() {
        assert!(!app_crate_version().is_empty());
    }

    #[test]
    fn app_can_use_ports_domain_shared() {
        assert!(!ports_crate_version().is_empty());
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
