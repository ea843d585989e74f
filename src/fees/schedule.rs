use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;
use super::region::{RegionRates, TaxComponent, TaxRegion};
use super::tier::{SubscriptionTier, TierRates};

/// The two rate tables the calculator reads: subscription fees and regional taxes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FeeSchedule {
    /// Date from which these rates apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<NaiveDate>,
    /// Buyer premium and seller commission for each subscription tier
    pub tiers: BTreeMap<SubscriptionTier, TierRates>,
    /// Tax component rates for each region
    pub regions: BTreeMap<TaxRegion, RegionRates>,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule::standard()
    }
}

impl FeeSchedule {
    /// The compiled-in marketplace rates.
    pub fn standard() -> Self {
        let tiers = BTreeMap::from([
            (SubscriptionTier::Free, TierRates::new(dec!(0.05), dec!(0.04))),
            (SubscriptionTier::Starter, TierRates::new(dec!(0.05), dec!(0.04))),
            (SubscriptionTier::Premium, TierRates::new(dec!(0.035), dec!(0.025))),
            (SubscriptionTier::Vip, TierRates::new(dec!(0.03), dec!(0.02))),
        ]);
        let regions = BTreeMap::from([
            (
                TaxRegion::Qc,
                RegionRates::new([
                    (TaxComponent::Gst, dec!(0.05)),
                    (TaxComponent::Qst, dec!(0.09975)),
                ]),
            ),
            (TaxRegion::On, RegionRates::new([(TaxComponent::Hst, dec!(0.13))])),
            (
                TaxRegion::Bc,
                RegionRates::new([
                    (TaxComponent::Gst, dec!(0.05)),
                    (TaxComponent::Pst, dec!(0.07)),
                ]),
            ),
            (TaxRegion::Ab, RegionRates::new([(TaxComponent::Gst, dec!(0.05))])),
            (TaxRegion::Eu, RegionRates::new([(TaxComponent::Vat, dec!(0.20))])),
            // varies by state, not collected yet
            (TaxRegion::Us, RegionRates::new([(TaxComponent::SalesTax, dec!(0))])),
        ]);
        FeeSchedule {
            effective_from: None,
            tiers,
            regions,
        }
    }

    /// Read and validate a JSON schedule.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScheduleError> {
        let schedule: FeeSchedule = serde_json::from_reader(reader)?;
        schedule.validate()?;
        log::info!(
            "Loaded fee schedule: {} tiers, {} regions",
            schedule.tiers.len(),
            schedule.regions.len()
        );
        Ok(schedule)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScheduleError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Rates for `tier`. Falls back to the free tier, then to zero.
    pub fn tier(&self, tier: SubscriptionTier) -> TierRates {
        self.tiers
            .get(&tier)
            .or_else(|| self.tiers.get(&SubscriptionTier::Free))
            .copied()
            .unwrap_or(TierRates::new(Decimal::ZERO, Decimal::ZERO))
    }

    /// Rates for `region`. Falls back to Quebec, then to no tax.
    pub fn region(&self, region: TaxRegion) -> RegionRates {
        self.regions
            .get(&region)
            .or_else(|| self.regions.get(&TaxRegion::Qc))
            .cloned()
            .unwrap_or_default()
    }

    /// Check every tier and region is present with rates in `[0, 1]`, and that
    /// no paid tier charges more than the free tier.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        for tier in SubscriptionTier::ALL {
            let rates = self
                .tiers
                .get(&tier)
                .ok_or(ScheduleError::MissingTier(tier))?;
            check_rate(tier.as_str(), "buyer premium", rates.buyer_premium)?;
            check_rate(tier.as_str(), "seller commission", rates.seller_commission)?;
        }

        let free = self.tier(SubscriptionTier::Free);
        for tier in SubscriptionTier::ALL {
            let rates = self.tier(tier);
            if rates.buyer_premium > free.buyer_premium {
                return Err(ScheduleError::TierAboveFree {
                    tier,
                    what: "buyer premium",
                    rate: rates.buyer_premium,
                    free: free.buyer_premium,
                });
            }
            if rates.seller_commission > free.seller_commission {
                return Err(ScheduleError::TierAboveFree {
                    tier,
                    what: "seller commission",
                    rate: rates.seller_commission,
                    free: free.seller_commission,
                });
            }
        }

        for region in TaxRegion::ALL {
            let rates = self
                .regions
                .get(&region)
                .ok_or(ScheduleError::MissingRegion(region))?;
            for component in region.components() {
                let rate = rates
                    .get(*component)
                    .ok_or(ScheduleError::MissingComponent {
                        region,
                        component: *component,
                    })?;
                check_rate(region.code(), component.as_str(), rate)?;
            }
        }
        Ok(())
    }
}

fn check_rate(owner: &str, what: &'static str, rate: Decimal) -> Result<(), ScheduleError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        Err(ScheduleError::RateOutOfRange {
            owner: owner.to_string(),
            what,
            rate,
        })
    } else {
        Ok(())
    }
}
