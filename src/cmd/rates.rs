//! Rates command - show the fee schedule in use

use crate::cmd::{format_percent, Context};
use auction_fees::{SubscriptionTier, TaxRegion};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// Output the schedule as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct TierRow {
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Buyer Premium")]
    buyer_premium: String,
    #[tabled(rename = "Seller Commission")]
    seller_commission: String,
}

#[derive(Debug, Clone, Tabled)]
struct RegionRow {
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Components")]
    components: String,
    #[tabled(rename = "Compounding")]
    compounding: String,
}

impl RatesCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let schedule = ctx.calculator.schedule();
        if self.json {
            println!("{}", serde_json::to_string_pretty(schedule)?);
            return Ok(());
        }

        if let Some(date) = schedule.effective_from {
            println!("Effective from {}", date.format("%Y-%m-%d"));
            println!();
        }

        let tiers: Vec<TierRow> = SubscriptionTier::ALL
            .iter()
            .map(|tier| {
                let rates = schedule.tier(*tier);
                TierRow {
                    tier: tier.to_string(),
                    buyer_premium: format_percent(rates.buyer_premium),
                    seller_commission: format_percent(rates.seller_commission),
                }
            })
            .collect();

        let regions: Vec<RegionRow> = TaxRegion::ALL
            .iter()
            .map(|region| {
                let rates = schedule.region(*region);
                let components = region
                    .components()
                    .iter()
                    .map(|c| format!("{} {}", c.as_str().to_uppercase(), format_percent(rates.rate(*c))))
                    .collect::<Vec<_>>()
                    .join(" + ");
                RegionRow {
                    region: region.to_string(),
                    components,
                    compounding: if *region == TaxRegion::Qc {
                        "QST on GST-inclusive".to_string()
                    } else {
                        "-".to_string()
                    },
                }
            })
            .collect();

        println!("{}", Table::new(tiers).with(Style::rounded()));
        println!();
        println!("{}", Table::new(regions).with(Style::rounded()));
        Ok(())
    }
}
