use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::FeeError;

/// Jurisdiction whose sales tax applies to a transaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxRegion {
    /// Quebec
    #[default]
    Qc,
    /// Ontario
    On,
    /// British Columbia
    Bc,
    /// Alberta
    Ab,
    /// European Union
    Eu,
    /// United States
    Us,
}

impl TaxRegion {
    pub const ALL: [TaxRegion; 6] = [
        TaxRegion::Qc,
        TaxRegion::On,
        TaxRegion::Bc,
        TaxRegion::Ab,
        TaxRegion::Eu,
        TaxRegion::Us,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TaxRegion::Qc => "QC",
            TaxRegion::On => "ON",
            TaxRegion::Bc => "BC",
            TaxRegion::Ab => "AB",
            TaxRegion::Eu => "EU",
            TaxRegion::Us => "US",
        }
    }

    /// Permissive lookup: unknown or empty input falls back to [`TaxRegion::Qc`].
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            if !s.trim().is_empty() {
                log::warn!("Unknown tax region '{}', using QC", s);
            }
            TaxRegion::Qc
        })
    }

    /// Tax components the region's formula reads.
    pub fn components(&self) -> &'static [TaxComponent] {
        match self {
            TaxRegion::Qc => &[TaxComponent::Gst, TaxComponent::Qst],
            TaxRegion::On => &[TaxComponent::Hst],
            TaxRegion::Bc => &[TaxComponent::Gst, TaxComponent::Pst],
            TaxRegion::Ab => &[TaxComponent::Gst],
            TaxRegion::Eu => &[TaxComponent::Vat],
            TaxRegion::Us => &[TaxComponent::SalesTax],
        }
    }

    /// Apply this region's tax formula to `taxable`.
    ///
    /// Quebec compounds: QST is charged on the GST-inclusive amount. Every other
    /// region charges each component on `taxable` alone. Nothing is rounded here.
    pub fn assess(&self, rates: &RegionRates, taxable: Decimal) -> TaxAssessment {
        let mut components = BTreeMap::new();
        match self {
            TaxRegion::Qc => {
                let gst = taxable * rates.rate(TaxComponent::Gst);
                let qst = (taxable + gst) * rates.rate(TaxComponent::Qst);
                components.insert(TaxComponent::Gst, gst);
                components.insert(TaxComponent::Qst, qst);
            }
            _ => {
                for component in self.components() {
                    components.insert(*component, taxable * rates.rate(*component));
                }
            }
        }
        let total: Decimal = components.values().copied().sum();
        log::debug!("{} tax on {}: {:?} = {}", self, taxable, components, total);
        TaxAssessment { components, total }
    }
}

impl FromStr for TaxRegion {
    type Err = FeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QC" => Ok(TaxRegion::Qc),
            "ON" => Ok(TaxRegion::On),
            "BC" => Ok(TaxRegion::Bc),
            "AB" => Ok(TaxRegion::Ab),
            "EU" => Ok(TaxRegion::Eu),
            "US" => Ok(TaxRegion::Us),
            _ => Err(FeeError::UnknownRegion(s.to_string())),
        }
    }
}

impl fmt::Display for TaxRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single named sales tax.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TaxComponent {
    /// Canadian federal Goods and Services Tax
    Gst,
    /// Quebec Sales Tax, charged on the GST-inclusive amount
    Qst,
    /// Harmonized Sales Tax
    Hst,
    /// Provincial Sales Tax
    Pst,
    /// Value Added Tax
    Vat,
    /// US state sales tax
    SalesTax,
}

impl TaxComponent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxComponent::Gst => "gst",
            TaxComponent::Qst => "qst",
            TaxComponent::Hst => "hst",
            TaxComponent::Pst => "pst",
            TaxComponent::Vat => "vat",
            TaxComponent::SalesTax => "sales_tax",
        }
    }
}

impl fmt::Display for TaxComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Component rates for one region, as fractions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RegionRates(
    #[schemars(with = "BTreeMap<TaxComponent, f64>")] BTreeMap<TaxComponent, Decimal>,
);

impl RegionRates {
    pub fn new<I>(rates: I) -> Self
    where
        I: IntoIterator<Item = (TaxComponent, Decimal)>,
    {
        RegionRates(rates.into_iter().collect())
    }

    /// Rate for `component`, zero when the region does not define it.
    pub fn rate(&self, component: TaxComponent) -> Decimal {
        self.0.get(&component).copied().unwrap_or_default()
    }

    pub fn get(&self, component: TaxComponent) -> Option<Decimal> {
        self.0.get(&component).copied()
    }

}

/// Unrounded result of applying a region's formula to a taxable amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxAssessment {
    pub components: BTreeMap<TaxComponent, Decimal>,
    pub total: Decimal,
}
