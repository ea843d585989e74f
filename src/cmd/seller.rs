//! Seller command - what the seller receives after commission

use crate::cmd::{format_money, Context};
use auction_fees::SellerNetBreakdown;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct SellerCommand {
    /// Hammer price (winning bid)
    #[arg(short, long, allow_negative_numbers = true)]
    amount: Decimal,

    /// Seller subscription tier (free, starter, premium, vip)
    #[arg(short, long, default_value = "free")]
    tier: String,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl SellerCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let amount = ctx.amount(self.amount)?;
        let breakdown = ctx
            .calculator
            .calculate_seller_net(amount, ctx.tier(&self.tier)?);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        } else {
            print_seller(&breakdown);
        }
        Ok(())
    }
}

pub fn print_seller(s: &SellerNetBreakdown) {
    println!();
    println!("SELLER NET ({} tier)", s.tier);
    println!();
    println!("  Hammer price:  {}", format_money(s.hammer_price));
    println!(
        "  Commission:    {} ({}%)",
        format_money(s.seller_commission),
        s.seller_commission_percent
    );
    println!("  NET PAYOUT:    {}", format_money(s.net_payout));
    println!();
}
