//! Purchase validation pipeline and totals.

use crate::{AccountId, PurchasePolicy, PurchaseRequest, TicketCategory, TicketCounts};
use cinema_tickets_shared::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use std::fmt;

/// Coarse classification of a rejected purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseErrorKind {
    /// The account identifier is not a positive integer.
    AccountId,
    /// Non-adult tickets requested without an adult.
    MissingAdult,
    /// The ticket total is zero or above the policy maximum.
    TicketCount,
    /// More infants than adult laps.
    InfantLap,
}

impl fmt::Display for PurchaseErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountId => formatter.write_str("accountId"),
            Self::MissingAdult => formatter.write_str("missingAdult"),
            Self::TicketCount => formatter.write_str("ticketCount"),
            Self::InfantLap => formatter.write_str("infantLap"),
        }
    }
}

/// Rejection raised by [`validate_purchase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// Account identifier below 1.
    InvalidAccountId {
        /// Raw identifier as supplied.
        account_id: i64,
    },
    /// At least one ticket requested but no adult ticket.
    MissingAdult,
    /// No tickets requested at all.
    ZeroTickets,
    /// Ticket total exceeds the policy maximum.
    TooManyTickets {
        /// Requested total.
        total: u64,
        /// Inclusive maximum.
        max: u32,
    },
    /// Infants outnumber adults while the lap rule is enabled.
    InfantWithoutLap {
        /// Requested infants.
        infants: u64,
        /// Requested adults.
        adults: u64,
    },
}

impl PurchaseError {
    /// Classification of this rejection.
    #[must_use]
    pub const fn kind(&self) -> PurchaseErrorKind {
        match self {
            Self::InvalidAccountId { .. } => PurchaseErrorKind::AccountId,
            Self::MissingAdult => PurchaseErrorKind::MissingAdult,
            Self::ZeroTickets | Self::TooManyTickets { .. } => PurchaseErrorKind::TicketCount,
            Self::InfantWithoutLap { .. } => PurchaseErrorKind::InfantLap,
        }
    }

    /// Stable error code in the `purchase` namespace.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        let code = match self {
            Self::InvalidAccountId { .. } => "invalid_account_id",
            Self::MissingAdult => "missing_adult",
            Self::ZeroTickets => "zero_tickets",
            Self::TooManyTickets { .. } => "too_many_tickets",
            Self::InfantWithoutLap { .. } => "infant_without_lap",
        };
        ErrorCode::new("purchase", code)
    }
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAccountId { account_id } => {
                write!(formatter, "invalid account id {account_id}: must be at least 1")
            },
            Self::MissingAdult => formatter.write_str(
                "child and infant tickets cannot be purchased without an adult ticket",
            ),
            Self::ZeroTickets => formatter.write_str("zero tickets requested"),
            Self::TooManyTickets { total, max } => write!(
                formatter,
                "too many tickets requested: {total} exceeds the maximum of {max}"
            ),
            Self::InfantWithoutLap { infants, adults } => write!(
                formatter,
                "{infants} infant tickets requested but only {adults} adult laps available"
            ),
        }
    }
}

impl std::error::Error for PurchaseError {}

impl From<PurchaseError> for ErrorEnvelope {
    fn from(error: PurchaseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message).with_metadata("kind", error.kind().to_string());
        match error {
            PurchaseError::InvalidAccountId { account_id } => {
                envelope.with_metadata("account_id", account_id.to_string())
            },
            PurchaseError::TooManyTickets { total, max } => envelope
                .with_metadata("total", total.to_string())
                .with_metadata("max", max.to_string()),
            PurchaseError::InfantWithoutLap { infants, adults } => envelope
                .with_metadata("infants", infants.to_string())
                .with_metadata("adults", adults.to_string()),
            PurchaseError::MissingAdult | PurchaseError::ZeroTickets => envelope,
        }
    }
}

/// Aggregates of an admissible purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseTotals {
    /// Tickets across all categories.
    pub total_tickets: u64,
    /// Amount to charge.
    pub total_cost: u64,
    /// Seats to reserve.
    pub total_seats: u64,
    /// Adult tickets.
    pub adult: u64,
    /// Child tickets.
    pub child: u64,
    /// Infant tickets.
    pub infant: u64,
}

impl PurchaseTotals {
    fn from_request(request: &PurchaseRequest) -> Self {
        let lines = request.lines();
        Self {
            total_tickets: request.total_tickets(),
            total_cost: lines.iter().map(|line| line.cost()).sum(),
            total_seats: lines.iter().map(|line| line.seats()).sum(),
            adult: request.quantity_of(TicketCategory::Adult),
            child: request.quantity_of(TicketCategory::Child),
            infant: request.quantity_of(TicketCategory::Infant),
        }
    }
}

/// Request that passed every rule, with its computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedPurchase {
    request: PurchaseRequest,
    totals: PurchaseTotals,
}

impl ValidatedPurchase {
    /// Purchasing account.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.request.account_id()
    }

    /// The accepted request.
    #[must_use]
    pub const fn request(&self) -> &PurchaseRequest {
        &self.request
    }

    /// Computed totals.
    #[must_use]
    pub const fn totals(&self) -> PurchaseTotals {
        self.totals
    }
}

/// Validate a purchase against `policy`, failing on the first broken rule.
///
/// Rules run in order: account id, adult presence, ticket count bounds, then
/// the infant lap rule when the policy enables it.
pub fn validate_purchase(
    policy: &PurchasePolicy,
    account_id: i64,
    counts: &TicketCounts,
) -> Result<ValidatedPurchase, PurchaseError> {
    let account_id = AccountId::parse(account_id)?;
    let request = PurchaseRequest::new(account_id, counts);

    let lines = request.lines();
    let adults_present = lines
        .iter()
        .any(|line| line.category() == TicketCategory::Adult && line.is_requested());
    let others_present = lines.iter().any(|line| line.is_requested());
    if others_present && !adults_present {
        return Err(PurchaseError::MissingAdult);
    }

    let total = request.total_tickets();
    if total == 0 {
        return Err(PurchaseError::ZeroTickets);
    }
    if total > u64::from(policy.max_tickets) {
        return Err(PurchaseError::TooManyTickets {
            total,
            max: policy.max_tickets,
        });
    }

    if policy.infants_require_adult_lap {
        let infants = request.quantity_of(TicketCategory::Infant);
        let adults = request.quantity_of(TicketCategory::Adult);
        if infants > adults {
            return Err(PurchaseError::InfantWithoutLap { infants, adults });
        }
    }

    let totals = PurchaseTotals::from_request(&request);
    Ok(ValidatedPurchase { request, totals })
}
