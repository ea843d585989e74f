//! Fee and sales tax engine for auction sales.
//!
//! Given a hammer price, the buyer and seller subscription tiers, a tax region
//! and whether the seller is a registered business, [`FeeCalculator`] works out
//! what the buyer pays, what the seller receives and what the platform keeps.

pub mod batch;
pub mod fees;

pub use fees::{
    round_money, validate_amount, BuyerCostBreakdown, FeeCalculator, FeeError, FeeSchedule,
    ScheduleError, SellerNetBreakdown, SellerType, SubscriptionTier, TaxComponent, TaxRegion,
    TransactionBreakdown, TransactionInput, MAX_HAMMER_PRICE,
};
