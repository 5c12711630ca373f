// ── Wallet ledger ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{EntityId, Identified};
use super::money::Money;
use super::network::Network;

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
pub enum TransactionKind {
    #[strum(to_string = "topup", serialize = "top-up", serialize = "deposit")]
    #[serde(rename = "topup", alias = "deposit", alias = "top-up")]
    TopUp,
    #[default]
    Purchase,
    Refund,
    Withdrawal,
    /// Manual credit or debit by an administrator.
    #[strum(to_string = "adjustment", serialize = "admin_adjustment")]
    #[serde(alias = "admin_adjustment")]
    Adjustment,
}

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
pub enum TransactionStatus {
    #[default]
    Pending,
    #[strum(to_string = "completed", serialize = "success", serialize = "successful")]
    #[serde(alias = "success", alias = "successful")]
    Completed,
    Failed,
}

/// One ledger entry. Append-only from the client's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: EntityId,
    pub kind: TransactionKind,
    pub amount: Money,
    pub status: TransactionStatus,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub network: Option<Network>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Transaction {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
