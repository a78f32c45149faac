//! Purchase request value objects.

use crate::TicketCategory;
use crate::purchase::PurchaseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Requested quantity per category; only present keys are considered.
pub type TicketCounts = BTreeMap<TicketCategory, u32>;

/// Identifier of the purchasing account. Always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct AccountId(u64);

impl AccountId {
    /// Parse a raw account identifier, rejecting anything below 1.
    pub fn parse(raw: i64) -> Result<Self, PurchaseError> {
        u64::try_from(raw)
            .ok()
            .filter(|value| *value >= 1)
            .map(Self)
            .ok_or(PurchaseError::InvalidAccountId { account_id: raw })
    }

    /// Return the wrapped value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = PurchaseError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<AccountId> for u64 {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// One category/quantity pair of a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TicketRequestLine {
    category: TicketCategory,
    quantity: u32,
}

impl TicketRequestLine {
    /// Create a request line. Zero quantities are allowed.
    #[must_use]
    pub const fn new(category: TicketCategory, quantity: u32) -> Self {
        Self { category, quantity }
    }

    /// Requested category.
    #[must_use]
    pub const fn category(&self) -> TicketCategory {
        self.category
    }

    /// Requested quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// True when the line requests at least one ticket.
    #[must_use]
    pub const fn is_requested(&self) -> bool {
        self.quantity > 0
    }

    /// Cost of this line at the fixed tariff.
    #[must_use]
    pub const fn cost(&self) -> u64 {
        self.quantity as u64 * self.category.price()
    }

    /// Seats this line reserves.
    #[must_use]
    pub const fn seats(&self) -> u64 {
        if self.category.occupies_seat() {
            self.quantity as u64
        } else {
            0
        }
    }
}

/// Account plus one request line per category present in the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    account_id: AccountId,
    lines: Vec<TicketRequestLine>,
}

impl PurchaseRequest {
    /// Build one line for every key in `counts`, zero quantities included.
    #[must_use]
    pub fn new(account_id: AccountId, counts: &TicketCounts) -> Self {
        let lines = counts
            .iter()
            .map(|(category, quantity)| TicketRequestLine::new(*category, *quantity))
            .collect();
        Self { account_id, lines }
    }

    /// Purchasing account.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Request lines in category order.
    #[must_use]
    pub fn lines(&self) -> &[TicketRequestLine] {
        &self.lines
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_tickets(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Sum of quantities for a single category.
    #[must_use]
    pub fn quantity_of(&self, category: TicketCategory) -> u64 {
        self.lines
            .iter()
            .filter(|line| line.category() == category)
            .map(|line| u64::from(line.quantity()))
            .sum()
    }
}
