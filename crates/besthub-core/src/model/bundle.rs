// ── Data bundles ──

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{EntityId, Identified};
use super::money::Money;
use super::network::Network;

/// Bundle category as used by the shop filters.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BundleCategory {
    #[default]
    Regular,
    Sme,
    Corporate,
    Social,
}

/// A data allowance such as `500MB` or `2.5GB`, normalised to megabytes
/// for sorting while keeping the label the backend sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataAmount {
    pub label: String,
    /// `None` when the label could not be parsed; such amounts sort last.
    pub megabytes: Option<u64>,
}

impl DataAmount {
    pub fn parse(label: &str) -> Self {
        Self {
            label: label.trim().to_owned(),
            megabytes: parse_megabytes(label),
        }
    }
}

impl fmt::Display for DataAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for DataAmount {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl PartialOrd for DataAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DataAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.megabytes, other.megabytes) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(&other.label),
        }
    }
}

/// `"2.5GB"` → 2560, `"500 MB"` → 500, `"1TB"` → 1048576. Decimals are
/// kept to three places using integer arithmetic.
fn parse_megabytes(label: &str) -> Option<u64> {
    let compact: String = label
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    let split = compact.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
    let (number, unit) = compact.split_at(split);

    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut thousandths = 0u64;
    for (i, d) in frac.chars().take(3).enumerate() {
        let digit = u64::from(d.to_digit(10)?);
        thousandths += digit * [100, 10, 1][i];
    }
    let milli = whole.checked_mul(1000)?.checked_add(thousandths)?;

    let factor: u64 = match unit {
        "MB" | "M" => 1,
        "GB" | "G" => 1024,
        "TB" | "T" => 1024 * 1024,
        _ => return None,
    };
    Some(milli.checked_mul(factor)? / 1000)
}

/// A purchasable unit of mobile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBundle {
    pub id: EntityId,
    pub network: Option<Network>,
    pub package_name: String,
    pub data_amount: Option<DataAmount>,
    pub price: Money,
    pub original_price: Option<Money>,
    pub validity: Option<String>,
    pub category: BundleCategory,
    pub description: Option<String>,
}

impl Identified for DataBundle {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
