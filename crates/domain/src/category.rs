//! Ticket categories with their fixed prices and seat occupancy.

use cinema_tickets_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a requested ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketCategory {
    /// Adult ticket.
    Adult,
    /// Child ticket.
    Child,
    /// Infant ticket (sits on an adult's lap).
    Infant,
}

impl TicketCategory {
    /// Every category, in canonical order.
    pub const ALL: [Self; 3] = [Self::Adult, Self::Child, Self::Infant];

    /// Unit price of one ticket.
    #[must_use]
    pub const fn price(self) -> u64 {
        match self {
            Self::Adult => 25,
            Self::Child => 15,
            Self::Infant => 0,
        }
    }

    /// Whether a ticket of this category reserves a seat.
    #[must_use]
    pub const fn occupies_seat(self) -> bool {
        !matches!(self, Self::Infant)
    }

    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Child => "CHILD",
            Self::Infant => "INFANT",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Raised when an input names a category outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError {
    /// Trimmed input that failed to parse.
    pub input: String,
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown ticket category `{}` (expected ADULT, CHILD or INFANT)",
            self.input
        )
    }
}

impl std::error::Error for CategoryParseError {}

impl From<CategoryParseError> for ErrorEnvelope {
    fn from(error: CategoryParseError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("purchase", "unknown_category"), message)
            .with_metadata("input", error.input)
    }
}

impl FromStr for TicketCategory {
    type Err = CategoryParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CategoryParseError {
                input: trimmed.to_owned(),
            })
    }
}
