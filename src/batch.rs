//! Quote many transactions at once from CSV.

use std::io::Read;

use auction_fees_derive::CsvSchema;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::fees::{
    validate_amount, FeeCalculator, FeeError, SubscriptionTier, TaxRegion, TransactionBreakdown,
    TransactionInput,
};

/// Column description generated by `#[derive(CsvSchema)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// One sale to quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, CsvSchema)]
pub struct TransactionRecord {
    /// Reference echoed back in the output (e.g. lot number)
    #[serde(default)]
    pub id: Option<String>,
    /// Winning bid amount, before fees and taxes
    #[serde(with = "rust_decimal::serde::str")]
    #[schemars(with = "f64")]
    pub hammer_price: Decimal,
    /// Buyer subscription tier: free, starter, premium or vip (default free)
    #[serde(default)]
    pub buyer_tier: Option<String>,
    /// Seller subscription tier: free, starter, premium or vip (default free)
    #[serde(default)]
    pub seller_tier: Option<String>,
    /// Tax region: QC, ON, BC, AB, EU or US (default QC)
    #[serde(default)]
    pub region: Option<String>,
    /// true when the seller is a tax-registered business (default false)
    #[serde(default)]
    pub seller_is_business: Option<bool>,
}

impl TransactionRecord {
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput {
            hammer_price: self.hammer_price,
            buyer_tier: or_default(&self.buyer_tier, SubscriptionTier::default().as_str()),
            seller_tier: or_default(&self.seller_tier, SubscriptionTier::default().as_str()),
            region: or_default(&self.region, TaxRegion::default().code()),
            seller_is_business: self.seller_is_business.unwrap_or(false),
        }
    }
}

// an empty column means "not given", not an unknown code
fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Quote for one input row. Row numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchQuote {
    pub row: usize,
    pub id: Option<String>,
    pub result: Result<TransactionBreakdown, FeeError>,
}

/// Sums over every successfully quoted row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchTotals {
    pub quoted: usize,
    pub failed: usize,
    pub hammer_price: Decimal,
    pub buyer_premium: Decimal,
    pub tax: Decimal,
    pub buyer_total: Decimal,
    pub seller_commission: Decimal,
    pub net_payout: Decimal,
    pub platform_revenue: Decimal,
}

impl BatchTotals {
    pub fn from_quotes(quotes: &[BatchQuote]) -> Self {
        quotes
            .iter()
            .fold(BatchTotals::default(), |mut totals, quote| {
                match &quote.result {
                    Ok(tx) => {
                        totals.quoted += 1;
                        totals.hammer_price += tx.hammer_price;
                        totals.buyer_premium += tx.buyer.buyer_premium;
                        totals.tax += tx.buyer.tax;
                        totals.buyer_total += tx.buyer.total;
                        totals.seller_commission += tx.seller.seller_commission;
                        totals.net_payout += tx.seller.net_payout;
                        totals.platform_revenue += tx.platform_revenue;
                    }
                    Err(_) => totals.failed += 1,
                }
                totals
            })
    }
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<TransactionRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr.deserialize().collect::<Result<Vec<TransactionRecord>, _>>()?;
    log::info!("Read {} csv records", records.len());
    Ok(records)
}

/// Quote each record independently; a bad row does not stop the batch.
///
/// With `strict`, unknown tier or region codes fail the row instead of
/// falling back to the defaults.
pub fn quote_records(
    calc: &FeeCalculator,
    records: &[TransactionRecord],
    strict: bool,
) -> Vec<BatchQuote> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let result = quote_record(calc, record, strict);
            if let Err(err) = &result {
                log::warn!("Row {}: {}", i + 1, err);
            }
            BatchQuote {
                row: i + 1,
                id: record.id.clone(),
                result,
            }
        })
        .collect()
}

fn quote_record(
    calc: &FeeCalculator,
    record: &TransactionRecord,
    strict: bool,
) -> Result<TransactionBreakdown, FeeError> {
    validate_amount(record.hammer_price)?;
    let input = record.to_input();
    let resolved = if strict {
        input.resolve_strict()?
    } else {
        input.resolve()
    };
    Ok(calc.quote(&resolved))
}
