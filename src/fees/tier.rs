use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::FeeError;

/// Subscription tier of a buyer or seller account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Starter,
    Premium,
    Vip,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 4] = [
        SubscriptionTier::Free,
        SubscriptionTier::Starter,
        SubscriptionTier::Premium,
        SubscriptionTier::Vip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Starter => "starter",
            SubscriptionTier::Premium => "premium",
            SubscriptionTier::Vip => "vip",
        }
    }

    /// Permissive lookup: unknown or empty input falls back to [`SubscriptionTier::Free`].
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            if !s.trim().is_empty() {
                log::warn!("Unknown subscription tier '{}', using free", s);
            }
            SubscriptionTier::Free
        })
    }
}

impl FromStr for SubscriptionTier {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "starter" => Ok(SubscriptionTier::Starter),
            "premium" => Ok(SubscriptionTier::Premium),
            "vip" => Ok(SubscriptionTier::Vip),
            _ => Err(FeeError::UnknownTier(s.to_string())),
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fee rates charged for one tier, as fractions (0.05 = 5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TierRates {
    /// Charged to the buyer on top of the hammer price
    #[schemars(with = "f64")]
    pub buyer_premium: Decimal,
    /// Deducted from the seller's proceeds
    #[schemars(with = "f64")]
    pub seller_commission: Decimal,
}

impl TierRates {
    pub const fn new(buyer_premium: Decimal, seller_commission: Decimal) -> Self {
        TierRates {
            buyer_premium,
            seller_commission,
        }
    }
}
