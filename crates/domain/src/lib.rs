//! # cinema-tickets-domain
//!
//! Domain model for venue ticket purchases:
//!
//! - **Category** - `TicketCategory` with fixed prices and seat occupancy
//! - **Request** - `AccountId`, `TicketRequestLine`, `PurchaseRequest`
//! - **Policy** - `PurchasePolicy` (ticket bound, optional infant lap rule)
//! - **Purchase** - `validate_purchase`, `PurchaseError`, `PurchaseTotals`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies
//! - Pure domain logic with no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use cinema_tickets_shared::shared_crate_version;

pub mod category;
pub mod policy;
pub mod purchase;
pub mod request;

pub use category::{CategoryParseError, TicketCategory};
pub use policy::{DEFAULT_MAX_TICKETS_PER_PURCHASE, PurchasePolicy};
pub use purchase::{
    PurchaseError, PurchaseErrorKind, PurchaseTotals, ValidatedPurchase, validate_purchase,
};
pub use request::{AccountId, PurchaseRequest, TicketCounts, TicketRequestLine};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
