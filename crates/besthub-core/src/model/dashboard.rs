// ── Admin aggregates ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::network::Network;

/// Platform totals shown on the admin dashboard. Computed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_users: u64,
    pub total_customers: u64,
    pub active_customers: u64,
    pub total_transactions: u64,
    pub today_orders: u64,
    pub total_revenue: Money,
    pub today_sales: Money,
    pub total_customer_balance: Money,
    pub sales_by_network: BTreeMap<Network, Money>,
}

/// Ledger aggregate from `/admin/transactions/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total_transactions: u64,
    pub total_amount: Money,
    pub total_topups: Money,
    pub total_purchases: Money,
    pub today_transactions: u64,
    /// Fields this client does not know about yet.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
