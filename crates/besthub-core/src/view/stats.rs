// ── Display aggregates ──
//
// Counts and sums shown above lists. They are computed from whatever the
// containers last published and are never fed back to the backend.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::model::{Money, Network, Order, OrderStatus, Role, User, UserStatus, UserWallet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
    /// Sum of completed orders only.
    pub completed_revenue: Money,
}

impl OrderStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(Self::default(), |mut acc, order| {
            acc.total += 1;
            match order.status {
                OrderStatus::Pending => acc.pending += 1,
                OrderStatus::Processing => acc.processing += 1,
                OrderStatus::Completed => {
                    acc.completed += 1;
                    acc.completed_revenue = acc.completed_revenue + order.amount;
                }
                OrderStatus::Failed => acc.failed += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub admins: usize,
    pub customers: usize,
    pub agents: usize,
    pub wholesalers: usize,
    pub pending: usize,
    pub suspended: usize,
}

impl UserStats {
    pub fn from_users<'a>(users: impl IntoIterator<Item = &'a User>) -> Self {
        users.into_iter().fold(Self::default(), |mut acc, user| {
            acc.total += 1;
            match user.role {
                Role::Admin => acc.admins += 1,
                Role::Customer => acc.customers += 1,
                Role::Agent => acc.agents += 1,
                Role::Wholesaler => acc.wholesalers += 1,
            }
            match user.status {
                UserStatus::Pending => acc.pending += 1,
                UserStatus::Suspended => acc.suspended += 1,
                UserStatus::Active => {}
            }
            acc
        })
    }
}

/// Sum of all listed wallet balances.
pub fn wallet_total<'a>(wallets: impl IntoIterator<Item = &'a UserWallet>) -> Money {
    wallets.into_iter().map(|w| w.balance).sum()
}

/// Per-network value of the orders placed on `today`, whatever their
/// status. Every network is present, zero when it had no sales. Orders
/// whose network cannot be told from their fields are skipped.
pub fn today_sales_by_network<'a>(
    orders: impl IntoIterator<Item = &'a Order>,
    today: NaiveDate,
) -> BTreeMap<Network, Money> {
    let mut sales: BTreeMap<Network, Money> = Network::iter().map(|n| (n, Money::ZERO)).collect();
    for order in orders {
        let placed_today = order
            .created_at
            .is_some_and(|at| at.date_naive() == today);
        if !placed_today {
            continue;
        }
        let network = order
            .network
            .or_else(|| Network::detect(None, Some(&order.package_name)));
        if let Some(network) = network {
            let entry = sales.entry(network).or_insert(Money::ZERO);
            *entry = *entry + order.amount;
        }
    }
    sales
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::EntityId;

    fn order(network: Option<Network>, name: &str, status: OrderStatus, day: u32, cedis: i64) -> Order {
        Order {
            id: EntityId::new(format!("{name}-{day}")),
            network,
            package_name: name.into(),
            data_amount: None,
            recipient: "0241234567".into(),
            amount: Money::from_major(cedis),
            status,
            reference: None,
            user_name: None,
            email: None,
            created_at: Some(Utc.with_ymd_and_hms(2024, 6, day, 10, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    #[test]
    fn order_stats_count_revenue_from_completed_only() {
        let orders = [
            order(Some(Network::Mtn), "a", OrderStatus::Completed, 1, 10),
            order(Some(Network::Mtn), "b", OrderStatus::Failed, 1, 99),
            order(Some(Network::Mtn), "c", OrderStatus::Completed, 1, 5),
        ];
        let stats = OrderStats::from_orders(&orders);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.completed_revenue, Money::from_major(15));
    }

    #[test]
    fn today_sales_split_by_network() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let orders = [
            order(Some(Network::Mtn), "MTN 1GB", OrderStatus::Pending, 2, 6),
            order(None, "Vodafone 2GB", OrderStatus::Completed, 2, 9),
            order(None, "AT - 1GB", OrderStatus::Failed, 2, 4),
            order(Some(Network::Mtn), "MTN 5GB", OrderStatus::Completed, 1, 25),
            order(None, "Data Bundle", OrderStatus::Completed, 2, 100),
        ];
        let sales = today_sales_by_network(&orders, today);
        assert_eq!(sales[&Network::Mtn], Money::from_major(6));
        assert_eq!(sales[&Network::Telecel], Money::from_major(9));
        assert_eq!(sales[&Network::AirtelTigo], Money::from_major(4));
    }

    #[test]
    fn empty_day_reports_zero_everywhere() {
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let sales = today_sales_by_network(&[], today);
        assert_eq!(sales.len(), 3);
        assert!(sales.values().all(|m| *m == Money::ZERO));
    }
}
