//! Buyer command - what the buyer pays for a lot

use crate::cmd::{format_money, Context};
use auction_fees::{BuyerCostBreakdown, SellerType};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct BuyerCommand {
    /// Hammer price (winning bid)
    #[arg(short, long, allow_negative_numbers = true)]
    amount: Decimal,

    /// Tax region (QC, ON, BC, AB, EU, US)
    #[arg(short, long, default_value = "QC")]
    region: String,

    /// Buyer subscription tier (free, starter, premium, vip)
    #[arg(short, long, default_value = "free")]
    tier: String,

    /// Seller is a tax-registered business
    #[arg(long)]
    business: bool,

    /// Leave taxes out of the total
    #[arg(long)]
    no_tax: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl BuyerCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let amount = ctx.amount(self.amount)?;
        let breakdown = ctx.calculator.calculate_buyer_total(
            amount,
            ctx.tier(&self.tier)?,
            ctx.region(&self.region)?,
            !self.no_tax,
            SellerType::from_is_business(self.business),
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        } else {
            print_buyer(&breakdown);
        }
        Ok(())
    }
}

pub fn print_buyer(b: &BuyerCostBreakdown) {
    println!();
    println!(
        "BUYER COST ({}, {} tier, {} seller)",
        b.region, b.tier, b.seller_type
    );
    println!();
    println!("  Hammer price:  {}", format_money(b.hammer_price));
    println!(
        "  Buyer premium: {} ({}%)",
        format_money(b.buyer_premium),
        b.buyer_premium_percent
    );
    println!("  Subtotal:      {}", format_money(b.subtotal));
    for (component, amount) in &b.tax_breakdown {
        println!(
            "    {:12} {}",
            format!("{}:", component.as_str().to_uppercase()),
            format_money(*amount)
        );
    }
    println!(
        "  Tax:           {} (hammer {}, premium {})",
        format_money(b.tax),
        format_money(b.tax_on_hammer),
        format_money(b.tax_on_premium)
    );
    println!("  TOTAL:         {}", format_money(b.total));
    if b.tax_savings > Decimal::ZERO {
        println!(
            "  Tax savings:   {} (private seller, hammer price not taxed)",
            format_money(b.tax_savings)
        );
    }
    println!();
}
