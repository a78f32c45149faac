//! Test fixtures for purchase error codes and envelopes.

use cinema_tickets_shared::{ErrorCode, ErrorEnvelope};

/// Every code a rejected purchase can carry.
pub fn purchase_error_codes() -> Vec<ErrorCode> {
    [
        "invalid_account_id",
        "missing_adult",
        "zero_tickets",
        "too_many_tickets",
        "infant_without_lap",
    ]
    .into_iter()
    .map(|code| ErrorCode::new("purchase", code))
    .collect()
}

/// A rejected-purchase envelope fixture.
pub fn missing_adult_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("purchase", "missing_adult"),
        "child and infant tickets cannot be purchased without an adult ticket",
    )
}

/// An invalid input error fixture.
pub fn invalid_input_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid input")
}
