//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a present but empty or malformed value fails fast
//! instead of falling back to the file or default value.

use crate::schema::{TicketingConfig, ValidatedTicketingConfig};
use cinema_tickets_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: maximum tickets per purchase.
pub const ENV_MAX_PER_PURCHASE: &str = "TICKETS_MAX_PER_PURCHASE";
/// Env var: require one adult lap per infant (`true`/`false`).
pub const ENV_INFANTS_REQUIRE_ADULT_LAP: &str = "TICKETS_INFANTS_REQUIRE_ADULT_LAP";

/// Typed env-derived overrides for `TicketingConfig`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketingEnv {
    /// Override for `purchase.maxTicketsPerPurchase`.
    pub max_tickets_per_purchase: Option<u32>,
    /// Override for `purchase.infantsRequireAdultLap`.
    pub infants_require_adult_lap: Option<bool>,
}

impl TicketingEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            max_tickets_per_purchase: parse_optional_u32(map, ENV_MAX_PER_PURCHASE)?,
            infants_require_adult_lap: parse_optional_bool(map, ENV_INFANTS_REQUIRE_ADULT_LAP)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in [ENV_MAX_PER_PURCHASE, ENV_INFANTS_REQUIRE_ADULT_LAP] {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// True when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.max_tickets_per_purchase.is_none() && self.infants_require_adult_lap.is_none()
    }
}

/// Apply env overrides to a base config (env wins over file/default values).
pub fn apply_env_overrides(
    base: TicketingConfig,
    env: &TicketingEnv,
) -> Result<ValidatedTicketingConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(value) = env.max_tickets_per_purchase {
        config.purchase.max_tickets_per_purchase = value;
    }
    if let Some(value) = env.infants_require_adult_lap {
        config.purchase.infants_require_adult_lap = value;
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Integer env var had an invalid value.
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidInt { .. } => ErrorCode::new("config", "invalid_env_int"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidInt { var, .. } => {
                write!(formatter, "{var} must be a non-negative integer")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidInt { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", redact_if_secret(var, &value))
            },
        }
    }
}

fn parse_optional_u32(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u32>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| EnvParseError::InvalidInt {
            var,
            value: raw.clone(),
        })
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}
