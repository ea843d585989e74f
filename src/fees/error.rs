use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::region::{TaxComponent, TaxRegion};
use super::tier::SubscriptionTier;

/// Largest hammer price accepted by [`validate_amount`].
///
/// With every rate in `[0, 1]`, no intermediate amount in a quote can exceed
/// `Decimal::MAX` below this bound.
pub const MAX_HAMMER_PRICE: Decimal = dec!(1000000000000);

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FeeError {
    #[error("unknown subscription tier: {0}")]
    UnknownTier(String),
    #[error("unknown tax region: {0}")]
    UnknownRegion(String),
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("amount {0} exceeds the maximum of {max}", max = MAX_HAMMER_PRICE)]
    AmountTooLarge(Decimal),
}

/// Problems found when validating a loaded [`FeeSchedule`](super::FeeSchedule).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("fee schedule has no rates for tier '{0}'")]
    MissingTier(SubscriptionTier),
    #[error("fee schedule has no rates for region {0}")]
    MissingRegion(TaxRegion),
    #[error("region {region} is missing its {component} rate")]
    MissingComponent {
        region: TaxRegion,
        component: TaxComponent,
    },
    #[error("{what} for {owner} must be between 0 and 1, got {rate}")]
    RateOutOfRange {
        owner: String,
        what: &'static str,
        rate: Decimal,
    },
    #[error("{what} for tier '{tier}' ({rate}) is higher than the free tier ({free})")]
    TierAboveFree {
        tier: SubscriptionTier,
        what: &'static str,
        rate: Decimal,
        free: Decimal,
    },
    #[error("invalid fee schedule json: {0}")]
    Json(String),
    #[error("failed to read fee schedule: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::Json(err.to_string())
    }
}

impl From<std::io::Error> for ScheduleError {
    fn from(err: std::io::Error) -> Self {
        ScheduleError::Io(err.to_string())
    }
}

/// Reject zero, negative or oversized hammer prices before they reach the calculator.
///
/// The calculator itself does not validate amounts; outer surfaces (CLI, HTTP)
/// call this first.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, FeeError> {
    if amount <= Decimal::ZERO {
        Err(FeeError::NonPositiveAmount(amount))
    } else if amount > MAX_HAMMER_PRICE {
        Err(FeeError::AmountTooLarge(amount))
    } else {
        Ok(amount)
    }
}
