//! Transaction command - both sides of a sale and the platform's revenue

use crate::cmd::buyer::print_buyer;
use crate::cmd::seller::print_seller;
use crate::cmd::{format_money, Context};
use auction_fees::SellerType;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct TransactionCommand {
    /// Hammer price (winning bid)
    #[arg(short, long, allow_negative_numbers = true)]
    amount: Decimal,

    /// Buyer subscription tier
    #[arg(long, default_value = "free")]
    buyer_tier: String,

    /// Seller subscription tier
    #[arg(long, default_value = "free")]
    seller_tier: String,

    /// Tax region (QC, ON, BC, AB, EU, US)
    #[arg(short, long, default_value = "QC")]
    region: String,

    /// Seller is a tax-registered business
    #[arg(long)]
    business: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TransactionOutput<'a> {
    #[serde(flatten)]
    transaction: &'a auction_fees::TransactionBreakdown,
    fingerprint: String,
}

impl TransactionCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let amount = ctx.amount(self.amount)?;
        let tx = ctx.calculator.calculate_full_transaction(
            amount,
            ctx.tier(&self.buyer_tier)?,
            ctx.tier(&self.seller_tier)?,
            ctx.region(&self.region)?,
            SellerType::from_is_business(self.business),
        );
        let fingerprint = tx.fingerprint()?;

        if self.json {
            let output = TransactionOutput {
                transaction: &tx,
                fingerprint,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_buyer(&tx.buyer);
            print_seller(&tx.seller);
            println!("PLATFORM REVENUE: {}", format_money(tx.platform_revenue));
            println!("Fingerprint: {}", fingerprint);
            println!();
        }
        Ok(())
    }
}
