//! # cinema-tickets-adapters
//!
//! Adapter implementations for ports (structured logging, payment, seat
//! reservation). This crate depends on `ports` and `shared`.

pub mod collaborators;
pub mod log_sink;
pub mod logger;

pub use collaborators::{LoggingPaymentService, LoggingSeatReservationService};
pub use log_sink::{LogSink, MemoryLogSink, StderrLogSink};
pub use logger::JsonLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
