pub mod breakdown;
pub mod calculator;
pub mod error;
pub mod region;
pub mod schedule;
pub mod tier;

// Flat public surface for the fee engine.
pub use breakdown::{
    round_money, BuyerCostBreakdown, SellerNetBreakdown, SellerType, TransactionBreakdown,
};
pub use calculator::{FeeCalculator, ResolvedTransaction, TransactionInput};
pub use error::{validate_amount, FeeError, ScheduleError, MAX_HAMMER_PRICE};
pub use region::{RegionRates, TaxAssessment, TaxComponent, TaxRegion};
pub use schedule::FeeSchedule;
pub use tier::{SubscriptionTier, TierRates};
