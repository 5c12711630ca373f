// ── Shopper dashboard ──

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use super::shop_orders::ShopOrders;
use super::slice::{Slice, SliceState};
use super::wallet::Wallet;
use crate::error::CoreError;
use crate::model::{EntityId, Money, Network, Order};
use crate::stream::SliceStream;
use crate::view::{OrderStats, today_sales_by_network};

/// How many orders the dashboard lists under "recent".
pub const RECENT_ORDERS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShopSummary {
    pub balance: Money,
    pub order_stats: OrderStats,
    pub today_orders: usize,
    pub today_sales: BTreeMap<Network, Money>,
    pub recent_orders: Vec<Order>,
}

impl ShopSummary {
    /// Summarise `orders` (newest first) as of `today`.
    pub fn compute(balance: Money, orders: &[Order], today: NaiveDate) -> Self {
        let today_orders = orders
            .iter()
            .filter(|o| o.created_at.is_some_and(|at| at.date_naive() == today))
            .count();
        let mut recent: Vec<Order> = orders.to_vec();
        recent.sort_by_key(|o| std::cmp::Reverse(o.created_at));
        recent.truncate(RECENT_ORDERS);
        Self {
            balance,
            order_stats: OrderStats::from_orders(orders),
            today_orders,
            today_sales: today_sales_by_network(orders, today),
            recent_orders: recent,
        }
    }
}

/// Loads the wallet and order containers together and derives the
/// dashboard figures from them.
pub struct ShopDashboard {
    wallet: Arc<Wallet>,
    orders: Arc<ShopOrders>,
    summary: Slice<ShopSummary>,
}

impl ShopDashboard {
    pub(crate) fn new(wallet: Arc<Wallet>, orders: Arc<ShopOrders>) -> Self {
        Self {
            wallet,
            orders,
            summary: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<ShopSummary> {
        self.summary.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<ShopSummary> {
        self.summary.subscribe()
    }

    pub fn clear_error(&self) {
        self.summary.clear_error();
    }

    pub async fn load(&self, user_id: &EntityId) -> Result<Arc<ShopSummary>, CoreError> {
        self.summary
            .fetch_with(async {
                let (balance, orders) = tokio::join!(
                    self.wallet.fetch_balance(user_id),
                    self.orders.fetch_for_user(user_id)
                );
                let balance = balance?;
                let orders = orders?;
                Ok(ShopSummary::compute(
                    balance,
                    &orders,
                    Utc::now().date_naive(),
                ))
            })
            .await
    }
}
