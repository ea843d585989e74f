//! Batch command - quote every sale in a CSV file

use crate::cmd::{format_money, Context};
use anyhow::Context as _;
use auction_fees::batch::{self, BatchQuote, BatchTotals};
use auction_fees::round_money;
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// CSV file of sales (see `schema csv-fields`), or "-" for stdin
    #[arg(short, long)]
    file: PathBuf,

    /// Output as CSV instead of formatted table
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// One line of batch output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct QuoteRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Hammer")]
    hammer_price: String,
    #[tabled(rename = "Premium")]
    buyer_premium: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Buyer Total")]
    buyer_total: String,
    #[tabled(rename = "Commission")]
    seller_commission: String,
    #[tabled(rename = "Net Payout")]
    net_payout: String,
    #[tabled(rename = "Platform")]
    platform_revenue: String,
    #[tabled(rename = "Error")]
    error: String,
}

#[derive(Debug, Serialize)]
struct BatchOutput {
    rows: Vec<QuoteRow>,
    totals: BatchTotals,
}

impl BatchCommand {
    pub fn exec(&self, ctx: &Context) -> anyhow::Result<()> {
        let records = if self.file.as_os_str() == "-" {
            batch::read_records(io::stdin().lock())?
        } else {
            let file = File::open(&self.file)
                .with_context(|| format!("opening {}", self.file.display()))?;
            batch::read_records(BufReader::new(file))?
        };

        let quotes = batch::quote_records(&ctx.calculator, &records, ctx.strict);
        let totals = BatchTotals::from_quotes(&quotes);
        let rows: Vec<QuoteRow> = quotes.iter().map(quote_row).collect();
        log::info!("Quoted {} rows, {} failed", totals.quoted, totals.failed);

        if self.json {
            let output = BatchOutput { rows, totals };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if self.csv {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        } else {
            print_table(&rows, &totals);
        }
        Ok(())
    }
}

fn quote_row(quote: &BatchQuote) -> QuoteRow {
    let id = quote.id.clone().unwrap_or_default();
    match &quote.result {
        Ok(tx) => QuoteRow {
            row: quote.row,
            id,
            region: tx.buyer.region.to_string(),
            hammer_price: cents(tx.hammer_price),
            buyer_premium: cents(tx.buyer.buyer_premium),
            tax: cents(tx.buyer.tax),
            buyer_total: cents(tx.buyer.total),
            seller_commission: cents(tx.seller.seller_commission),
            net_payout: cents(tx.seller.net_payout),
            platform_revenue: cents(tx.platform_revenue),
            error: String::new(),
        },
        Err(err) => QuoteRow {
            row: quote.row,
            id,
            region: String::new(),
            hammer_price: String::new(),
            buyer_premium: String::new(),
            tax: String::new(),
            buyer_total: String::new(),
            seller_commission: String::new(),
            net_payout: String::new(),
            platform_revenue: String::new(),
            error: err.to_string(),
        },
    }
}

fn cents(amount: rust_decimal::Decimal) -> String {
    round_money(amount).to_string()
}

fn print_table(rows: &[QuoteRow], totals: &BatchTotals) {
    if rows.is_empty() {
        println!("No transactions found");
        return;
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..10)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
    println!("Quoted: {} | Failed: {}", totals.quoted, totals.failed);
    println!(
        "Hammer: {} | Premiums: {} | Tax: {} | Buyers pay: {}",
        format_money(totals.hammer_price),
        format_money(totals.buyer_premium),
        format_money(totals.tax),
        format_money(totals.buyer_total)
    );
    println!(
        "Commissions: {} | Sellers receive: {} | PLATFORM REVENUE: {}",
        format_money(totals.seller_commission),
        format_money(totals.net_payout),
        format_money(totals.platform_revenue)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_fees::FeeError;
    use rust_decimal_macros::dec;

    #[test]
    fn failed_quote_row_carries_error() {
        let quote = BatchQuote {
            row: 3,
            id: Some("lot-3".to_string()),
            result: Err(FeeError::NonPositiveAmount(dec!(-10))),
        };
        let row = quote_row(&quote);
        assert_eq!(row.row, 3);
        assert_eq!(row.id, "lot-3");
        assert!(row.buyer_total.is_empty());
        assert!(row.error.contains("amount must be positive"));
    }

    #[test]
    fn quote_row_amounts_are_rounded_to_cents() {
        assert_eq!(cents(dec!(1057.736875)), "1057.74");
        assert_eq!(cents(dec!(980)), "980.00");
    }
}
