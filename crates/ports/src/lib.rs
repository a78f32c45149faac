//! # cinema-tickets-ports
//!
//! Boundary traits between the purchase use case and the outside world.
//!
//! This crate defines the collaborators a purchase hands off to once
//! validation succeeds, plus the structured logging contract. It depends only
//! on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod logger;
pub mod payment;
pub mod reservation;

pub use logger::*;
pub use payment::*;
pub use reservation::*;

// Port signatures take `AccountId`; adapters get it from here.
pub use cinema_tickets_domain::AccountId;
