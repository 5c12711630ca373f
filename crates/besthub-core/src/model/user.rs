// ── Users & roles ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::entity_id::{EntityId, Identified};
use super::money::Money;

/// Account role. Agents and wholesalers see their own price tables.
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
pub enum Role {
    #[default]
    Customer,
    Agent,
    Wholesaler,
    Admin,
}

impl Role {
    /// Roles that have a price table in the admin price book.
    pub const PRICED: [Role; 3] = [Role::Customer, Role::Agent, Role::Wholesaler];

    /// Roles a visitor may pick at registration.
    pub fn is_self_service(self) -> bool {
        !matches!(self, Self::Admin)
    }
}

/// Account status.
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
pub enum UserStatus {
    #[default]
    Active,
    Pending,
    Suspended,
}

/// A platform account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub user_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    /// Balance as last reported by the backend, when the listing carries it.
    pub wallet_balance: Option<Money>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Identified for User {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
