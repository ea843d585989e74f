//! Buyer total, seller net and platform revenue for a single sale.

use rust_decimal::Decimal;

use super::breakdown::{
    percent, round_money, BuyerCostBreakdown, SellerNetBreakdown, SellerType,
    TransactionBreakdown,
};
use super::error::FeeError;
use super::region::TaxRegion;
use super::schedule::FeeSchedule;
use super::tier::SubscriptionTier;

/// Computes fees and taxes from a [`FeeSchedule`].
///
/// Immutable after construction, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct FeeCalculator {
    schedule: FeeSchedule,
}

/// Loosely typed description of a sale, as it arrives from a request or CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub hammer_price: Decimal,
    pub buyer_tier: String,
    pub seller_tier: String,
    pub region: String,
    pub seller_is_business: bool,
}

/// A [`TransactionInput`] with its tier and region codes resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTransaction {
    pub hammer_price: Decimal,
    pub buyer_tier: SubscriptionTier,
    pub seller_tier: SubscriptionTier,
    pub region: TaxRegion,
    pub seller_type: SellerType,
}

impl TransactionInput {
    /// Resolve codes, defaulting unknown tiers to free and unknown regions to QC.
    pub fn resolve(&self) -> ResolvedTransaction {
        ResolvedTransaction {
            hammer_price: self.hammer_price,
            buyer_tier: SubscriptionTier::parse_lenient(&self.buyer_tier),
            seller_tier: SubscriptionTier::parse_lenient(&self.seller_tier),
            region: TaxRegion::parse_lenient(&self.region),
            seller_type: SellerType::from_is_business(self.seller_is_business),
        }
    }

    /// Resolve codes, failing on anything unrecognized.
    pub fn resolve_strict(&self) -> Result<ResolvedTransaction, FeeError> {
        Ok(ResolvedTransaction {
            hammer_price: self.hammer_price,
            buyer_tier: self.buyer_tier.parse()?,
            seller_tier: self.seller_tier.parse()?,
            region: self.region.parse()?,
            seller_type: SellerType::from_is_business(self.seller_is_business),
        })
    }
}

impl FeeCalculator {
    pub fn new(schedule: FeeSchedule) -> Self {
        FeeCalculator { schedule }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Buyer premium rate for a tier name. Unknown names get the free rate.
    pub fn get_buyer_premium(&self, tier: &str) -> Decimal {
        self.schedule
            .tier(SubscriptionTier::parse_lenient(tier))
            .buyer_premium
    }

    /// Seller commission rate for a tier name. Unknown names get the free rate.
    pub fn get_seller_commission(&self, tier: &str) -> Decimal {
        self.schedule
            .tier(SubscriptionTier::parse_lenient(tier))
            .seller_commission
    }

    pub fn calculate_buyer_total(
        &self,
        hammer_price: Decimal,
        tier: SubscriptionTier,
        region: TaxRegion,
        include_tax: bool,
        seller_type: SellerType,
    ) -> BuyerCostBreakdown {
        // both sides of a sale work from the hammer price in cents
        let hammer_price = round_money(hammer_price);
        let premium_rate = self.schedule.tier(tier).buyer_premium;
        let buyer_premium = hammer_price * premium_rate;
        let subtotal = hammer_price + buyer_premium;
        let zero = round_money(Decimal::ZERO);

        let mut breakdown = BuyerCostBreakdown {
            hammer_price,
            buyer_premium: round_money(buyer_premium),
            buyer_premium_percent: percent(premium_rate),
            subtotal: round_money(subtotal),
            tax: zero,
            tax_on_hammer: zero,
            tax_on_premium: zero,
            tax_breakdown: Default::default(),
            total: round_money(subtotal),
            region,
            tier,
            seller_type,
            tax_savings: zero,
        };
        if !include_tax {
            return breakdown;
        }

        let rates = self.schedule.region(region);
        // individual sellers: hammer price exempt, premium still taxed
        let taxable = match seller_type {
            SellerType::Business => subtotal,
            SellerType::Individual => buyer_premium,
        };
        let assessment = region.assess(&rates, taxable);
        let tax = assessment.total;

        let (tax_on_hammer, tax_on_premium) = match seller_type {
            SellerType::Business if !subtotal.is_zero() => {
                let on_hammer = tax * hammer_price / subtotal;
                (on_hammer, tax - on_hammer)
            }
            SellerType::Business => (Decimal::ZERO, Decimal::ZERO),
            SellerType::Individual => (Decimal::ZERO, tax),
        };

        let tax_savings = match seller_type {
            SellerType::Individual => region.assess(&rates, hammer_price).total,
            SellerType::Business => Decimal::ZERO,
        };

        log::debug!(
            "Buyer total: hammer={}, premium={}, taxable={}, tax={}, savings={}",
            hammer_price,
            buyer_premium,
            taxable,
            tax,
            tax_savings
        );

        breakdown.tax = round_money(tax);
        breakdown.tax_on_hammer = round_money(tax_on_hammer);
        breakdown.tax_on_premium = round_money(tax_on_premium);
        breakdown.tax_breakdown = assessment
            .components
            .into_iter()
            .map(|(component, amount)| (component, round_money(amount)))
            .collect();
        breakdown.total = round_money(subtotal + tax);
        breakdown.tax_savings = round_money(tax_savings);
        breakdown
    }

    /// Seller proceeds after commission. No tax is applied on this side.
    pub fn calculate_seller_net(
        &self,
        hammer_price: Decimal,
        tier: SubscriptionTier,
    ) -> SellerNetBreakdown {
        let commission_rate = self.schedule.tier(tier).seller_commission;
        let hammer_price = round_money(hammer_price);
        let seller_commission = round_money(hammer_price * commission_rate);
        SellerNetBreakdown {
            hammer_price,
            seller_commission,
            seller_commission_percent: percent(commission_rate),
            net_payout: hammer_price - seller_commission,
            tier,
        }
    }

    pub fn calculate_full_transaction(
        &self,
        hammer_price: Decimal,
        buyer_tier: SubscriptionTier,
        seller_tier: SubscriptionTier,
        region: TaxRegion,
        seller_type: SellerType,
    ) -> TransactionBreakdown {
        let hammer_price = round_money(hammer_price);
        let buyer = self.calculate_buyer_total(hammer_price, buyer_tier, region, true, seller_type);
        let seller = self.calculate_seller_net(hammer_price, seller_tier);
        let platform_revenue = buyer.buyer_premium + seller.seller_commission;
        TransactionBreakdown {
            hammer_price,
            buyer,
            seller,
            platform_revenue,
        }
    }

    /// [`calculate_full_transaction`](Self::calculate_full_transaction) for
    /// already resolved input.
    pub fn quote(&self, tx: &ResolvedTransaction) -> TransactionBreakdown {
        self.calculate_full_transaction(
            tx.hammer_price,
            tx.buyer_tier,
            tx.seller_tier,
            tx.region,
            tx.seller_type,
        )
    }
}
