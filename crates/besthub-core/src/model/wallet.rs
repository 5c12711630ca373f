// ── Wallets & payment sessions ──

use serde::{Deserialize, Serialize};

use super::entity_id::{EntityId, Identified};
use super::money::Money;
use super::transaction::Transaction;

/// Admin view of one user's wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWallet {
    pub user_id: EntityId,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub balance: Money,
}

impl Identified for UserWallet {
    fn id(&self) -> &EntityId {
        &self.user_id
    }
}

/// A started top-up. The user completes payment at `authorization_url`,
/// then the reference is verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopUpSession {
    pub authorization_url: String,
    pub reference: Option<String>,
    pub amount: Money,
}

/// Outcome of verifying a top-up reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUpReceipt {
    /// Balance reported by the backend after crediting.
    pub new_balance: Money,
    pub credited: Option<Transaction>,
}

/// A card-payment order waiting for the shopper to pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub authorization_url: String,
    pub order_id: Option<EntityId>,
}
