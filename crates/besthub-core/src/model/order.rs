// ── Orders ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::bundle::DataAmount;
use super::entity_id::{EntityId, Identified};
use super::money::Money;
use super::network::Network;

/// Fulfilment status. The admin order queues move orders between these.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn is_final(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A data purchase for one recipient number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub network: Option<Network>,
    pub package_name: String,
    pub data_amount: Option<DataAmount>,
    /// Phone number the bundle is delivered to.
    pub recipient: String,
    pub amount: Money,
    pub status: OrderStatus,
    pub reference: Option<String>,
    /// Display name of the buyer, when the backend populates it.
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Identified for Order {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
