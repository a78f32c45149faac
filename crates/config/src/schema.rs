//! Ticketing configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - A validated config converts into the domain `PurchasePolicy`.

use cinema_tickets_domain::{DEFAULT_MAX_TICKETS_PER_PURCHASE, PurchasePolicy};
use cinema_tickets_shared::{BoundedU32, ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const MAX_TICKETS_MIN: u32 = 1;
const MAX_TICKETS_MAX: u32 = 100;

/// Top-level ticketing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct TicketingConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Purchase rule settings.
    pub purchase: PurchaseRulesConfig,
}

impl Default for TicketingConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            purchase: PurchaseRulesConfig::default(),
        }
    }
}

impl TicketingConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(self) -> Result<ValidatedTicketingConfig, ConfigSchemaError> {
        self.validate_version()?;
        let limits = ConfigLimits::new(&self)?;
        Ok(ValidatedTicketingConfig { raw: self, limits })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

/// Purchase rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PurchaseRulesConfig {
    /// Inclusive maximum of tickets in one purchase.
    pub max_tickets_per_purchase: u32,
    /// Reject purchases with more infants than adults.
    pub infants_require_adult_lap: bool,
}

impl Default for PurchaseRulesConfig {
    fn default() -> Self {
        Self {
            max_tickets_per_purchase: DEFAULT_MAX_TICKETS_PER_PURCHASE,
            infants_require_adult_lap: false,
        }
    }
}

/// Validated config wrapper carrying bounded numeric values.
#[derive(Debug, Clone)]
pub struct ValidatedTicketingConfig {
    raw: TicketingConfig,
    limits: ConfigLimits,
}

impl ValidatedTicketingConfig {
    /// Access validated numeric bounds.
    #[must_use]
    pub const fn limits(&self) -> &ConfigLimits {
        &self.limits
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &TicketingConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> TicketingConfig {
        self.raw
    }

    /// Domain policy described by this config.
    #[must_use]
    pub const fn purchase_policy(&self) -> PurchasePolicy {
        PurchasePolicy {
            max_tickets: self.limits.max_tickets_per_purchase.get(),
            infants_require_adult_lap: self.raw.purchase.infants_require_adult_lap,
        }
    }
}

impl AsRef<TicketingConfig> for ValidatedTicketingConfig {
    fn as_ref(&self) -> &TicketingConfig {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedTicketingConfig {
    type Target = TicketingConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Validated numeric limits derived from the config.
#[derive(Debug, Clone, Copy)]
pub struct ConfigLimits {
    /// Maximum tickets per purchase.
    pub max_tickets_per_purchase: BoundedU32<MAX_TICKETS_MIN, MAX_TICKETS_MAX>,
}

impl ConfigLimits {
    fn new(config: &TicketingConfig) -> Result<Self, ConfigSchemaError> {
        Ok(Self {
            max_tickets_per_purchase: bounded_u32(
                "purchase",
                "maxTicketsPerPurchase",
                config.purchase.max_tickets_per_purchase,
                MAX_TICKETS_MIN,
                MAX_TICKETS_MAX,
            )?,
        })
    }
}

/// Parse a ticketing config from a JSON string, applying validation.
pub fn parse_ticketing_config_json(
    input: &str,
) -> Result<ValidatedTicketingConfig, ErrorEnvelope> {
    let config: TicketingConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a ticketing config from a TOML string, applying validation.
pub fn parse_ticketing_config_toml(
    input: &str,
) -> Result<ValidatedTicketingConfig, ErrorEnvelope> {
    let config: TicketingConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Typed validation errors for the configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// A numeric limit is out of bounds.
    LimitOutOfRange {
        /// Schema section (e.g. `purchase`).
        section: &'static str,
        /// Field name in the config file (e.g. `maxTicketsPerPurchase`).
        field: &'static str,
        /// Value provided.
        value: u64,
        /// Minimum allowed value.
        min: u64,
        /// Maximum allowed value.
        max: u64,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::LimitOutOfRange { .. } => ErrorCode::new("config", "invalid_limit"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported config version: {found} (supported: {supported})"
                )
            },
            Self::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => write!(
                formatter,
                "{section}.{field} must be within [{min}, {max}] (got {value})"
            ),
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::LimitOutOfRange {
                section,
                field,
                value,
                min,
                max,
            } => envelope
                .with_metadata("section", section)
                .with_metadata("field", field)
                .with_metadata("value", value.to_string())
                .with_metadata("min", min.to_string())
                .with_metadata("max", max.to_string()),
        }
    }
}

fn bounded_u32<const MIN: u32, const MAX: u32>(
    section: &'static str,
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<BoundedU32<MIN, MAX>, ConfigSchemaError> {
    BoundedU32::try_new(value).map_err(|_| ConfigSchemaError::LimitOutOfRange {
        section,
        field,
        value: u64::from(value),
        min: u64::from(min),
        max: u64::from(max),
    })
}
