pub mod batch;
pub mod buyer;
pub mod rates;
pub mod schema;
pub mod seller;
pub mod transaction;

use anyhow::Context as _;
use auction_fees::{
    round_money, validate_amount, FeeCalculator, FeeSchedule, SubscriptionTier, TaxRegion,
};
use rust_decimal::Decimal;
use std::path::Path;

/// State shared by every subcommand.
pub struct Context {
    pub calculator: FeeCalculator,
    pub strict: bool,
}

impl Context {
    /// Use the schedule at `path` if given, otherwise the built-in rates.
    pub fn load(path: Option<&Path>, strict: bool) -> anyhow::Result<Self> {
        let schedule = match path {
            Some(path) => FeeSchedule::from_path(path)
                .with_context(|| format!("loading fee schedule {}", path.display()))?,
            None => FeeSchedule::standard(),
        };
        Ok(Context {
            calculator: FeeCalculator::new(schedule),
            strict,
        })
    }

    pub fn tier(&self, tier: &str) -> anyhow::Result<SubscriptionTier> {
        if self.strict {
            Ok(tier.parse::<SubscriptionTier>()?)
        } else {
            Ok(SubscriptionTier::parse_lenient(tier))
        }
    }

    pub fn region(&self, region: &str) -> anyhow::Result<TaxRegion> {
        if self.strict {
            Ok(region.parse::<TaxRegion>()?)
        } else {
            Ok(TaxRegion::parse_lenient(region))
        }
    }

    pub fn amount(&self, amount: Decimal) -> anyhow::Result<Decimal> {
        Ok(validate_amount(amount)?)
    }
}

pub fn format_money(amount: Decimal) -> String {
    let amount = round_money(amount);
    if amount < Decimal::ZERO {
        format!("-${}", amount.abs())
    } else {
        format!("${}", amount)
    }
}

pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(dec!(1057.736875)), "$1057.74");
        assert_eq!(format_money(dec!(5)), "$5.00");
        assert_eq!(format_money(dec!(-2.5)), "-$2.50");
        assert_eq!(format_money(dec!(0.125)), "$0.12");
        assert_eq!(format_money(dec!(-7.736875)), "-$7.74");
    }

    #[test]
    fn oversized_amount_rejected() {
        let ctx = Context::load(None, false).unwrap();
        let err = ctx.amount(Decimal::MAX).unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(dec!(0.09975)), "9.975%");
        assert_eq!(format_percent(dec!(0.05)), "5%");
    }

    #[test]
    fn strict_context_rejects_unknown_codes() {
        let ctx = Context::load(None, true).unwrap();
        assert!(ctx.tier("gold").is_err());
        assert!(ctx.region("TX").is_err());
        assert_eq!(ctx.tier("vip").unwrap(), SubscriptionTier::Vip);

        let lenient = Context::load(None, false).unwrap();
        assert_eq!(lenient.tier("gold").unwrap(), SubscriptionTier::Free);
        assert_eq!(lenient.region("TX").unwrap(), TaxRegion::Qc);
    }
}
