use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::region::{TaxComponent, TaxRegion};
use super::tier::SubscriptionTier;

/// Whether the seller is registered to collect sales tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SellerType {
    /// Private seller: the hammer price is tax-exempt
    #[default]
    Individual,
    /// Registered business: hammer price and premium are both taxable
    Business,
}

impl SellerType {
    pub fn from_is_business(is_business: bool) -> Self {
        if is_business {
            SellerType::Business
        } else {
            SellerType::Individual
        }
    }
}

impl fmt::Display for SellerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SellerType::Individual => write!(f, "individual"),
            SellerType::Business => write!(f, "business"),
        }
    }
}

/// What the buyer pays. Money fields are rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BuyerCostBreakdown {
    #[schemars(with = "f64")]
    pub hammer_price: Decimal,
    #[schemars(with = "f64")]
    pub buyer_premium: Decimal,
    #[schemars(with = "f64")]
    pub buyer_premium_percent: Decimal,
    #[schemars(with = "f64")]
    pub subtotal: Decimal,
    #[schemars(with = "f64")]
    pub tax: Decimal,
    #[schemars(with = "f64")]
    pub tax_on_hammer: Decimal,
    #[schemars(with = "f64")]
    pub tax_on_premium: Decimal,
    #[schemars(with = "BTreeMap<TaxComponent, f64>")]
    pub tax_breakdown: BTreeMap<TaxComponent, Decimal>,
    #[schemars(with = "f64")]
    pub total: Decimal,
    pub region: TaxRegion,
    pub tier: SubscriptionTier,
    pub seller_type: SellerType,
    /// Tax the buyer avoids because a private seller's hammer price is exempt
    #[schemars(with = "f64")]
    pub tax_savings: Decimal,
}

impl BuyerCostBreakdown {
    /// Hex SHA-256 of the canonical JSON form.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        fingerprint(self)
    }
}

/// What the seller receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SellerNetBreakdown {
    #[schemars(with = "f64")]
    pub hammer_price: Decimal,
    #[schemars(with = "f64")]
    pub seller_commission: Decimal,
    #[schemars(with = "f64")]
    pub seller_commission_percent: Decimal,
    #[schemars(with = "f64")]
    pub net_payout: Decimal,
    pub tier: SubscriptionTier,
}

/// Both sides of a sale plus the platform's take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransactionBreakdown {
    #[schemars(with = "f64")]
    pub hammer_price: Decimal,
    pub buyer: BuyerCostBreakdown,
    pub seller: SellerNetBreakdown,
    /// Buyer premium plus seller commission
    #[schemars(with = "f64")]
    pub platform_revenue: Decimal,
}

impl TransactionBreakdown {
    /// Hex SHA-256 of the canonical JSON form.
    ///
    /// An invoice built from the same inputs and schedule as a preview carries
    /// the same fingerprint.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        fingerprint(self)
    }
}

fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    // struct fields serialize in declaration order and maps are BTreeMaps,
    // so the JSON is canonical
    let bytes = serde_json::to_vec(value)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Round a monetary amount to cents, ties to even. Always carries two decimal places.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// Express a fractional rate as a percentage, e.g. `0.035` as `3.5`.
pub(crate) fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}
