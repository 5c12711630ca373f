// ── Telecom networks ──
//
// The backend names networks three different ways depending on the
// endpoint: shop slugs (`airteltigo`), admin order queues (`at`), and the
// price book (`AT`). All of them map onto one enum here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// A carrier the platform resells data for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mtn,
    Telecel,
    #[serde(alias = "at")]
    AirtelTigo,
}

impl Network {
    /// Slug used by shop endpoints and order bodies.
    pub fn shop_slug(self) -> &'static str {
        match self {
            Self::Mtn => "mtn",
            Self::Telecel => "telecel",
            Self::AirtelTigo => "airteltigo",
        }
    }

    /// Slug used by the admin order queues.
    pub fn admin_slug(self) -> &'static str {
        match self {
            Self::Mtn => "mtn",
            Self::Telecel => "telecel",
            Self::AirtelTigo => "at",
        }
    }

    /// Key used by the admin price book.
    pub fn price_key(self) -> &'static str {
        match self {
            Self::Mtn => "MTN",
            Self::Telecel => "Telecel",
            Self::AirtelTigo => "AT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mtn => "MTN",
            Self::Telecel => "Telecel",
            Self::AirtelTigo => "AirtelTigo",
        }
    }

    /// Work out which network a record belongs to from its `network` field,
    /// falling back to its product name.
    ///
    /// Product names are matched on brand words (`vodafone` counts as
    /// Telecel, `airtel`/`tigo` as AirtelTigo). `at` only counts as a whole
    /// word, so "Data Bundle" does not match.
    pub fn detect(network: Option<&str>, product: Option<&str>) -> Option<Self> {
        if let Some(n) = network.and_then(|n| n.parse().ok()) {
            return Some(n);
        }
        let product = product?.to_lowercase();
        if product.contains("mtn") {
            return Some(Self::Mtn);
        }
        if product.contains("telecel") || product.contains("vodafone") {
            return Some(Self::Telecel);
        }
        if product.contains("airtel") || product.contains("tigo") {
            return Some(Self::AirtelTigo);
        }
        product
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|word| word == "at")
            .then_some(Self::AirtelTigo)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network '{0}' (expected mtn, telecel or airteltigo)")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "mtn" => Ok(Self::Mtn),
            "telecel" | "vodafone" => Ok(Self::Telecel),
            "airteltigo" | "at" | "airtel" | "tigo" => Ok(Self::AirtelTigo),
            _ => Err(UnknownNetwork(s.to_owned())),
        }
    }
}
