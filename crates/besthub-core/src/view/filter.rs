// ── List filters ──
//
// Every filter is the logical AND of its predicates; an unset predicate
// matches everything. Text search is case-insensitive, except phone
// numbers which match as plain substrings.

use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::model::{
    DataBundle, Order, OrderStatus, Role, Transaction, TransactionKind, TransactionStatus, User,
    UserStatus, UserWallet,
};

/// Lowercased needle, or `None` for an empty search.
fn needle(search: &str) -> Option<String> {
    let trimmed = search.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn contains_raw(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.contains(needle))
}

// ── Orders ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub search: String,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }
        let Some(lower) = needle(&self.search) else {
            return true;
        };
        let raw = self.search.trim();
        contains_ci(order.user_name.as_deref(), &lower)
            || contains_ci(order.email.as_deref(), &lower)
            || contains_ci(order.reference.as_deref(), &lower)
            || contains_ci(Some(&order.package_name), &lower)
            || contains_raw(Some(&order.recipient), raw)
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

// ── Users ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub search: String,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|r| r != user.role) {
            return false;
        }
        if self.status.is_some_and(|s| s != user.status) {
            return false;
        }
        let Some(lower) = needle(&self.search) else {
            return true;
        };
        contains_ci(Some(&user.user_name), &lower)
            || contains_ci(Some(&user.email), &lower)
            || contains_raw(user.phone.as_deref(), self.search.trim())
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

// ── Transactions ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub status: Option<TransactionStatus>,
    pub search: String,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }
        if self.status.is_some_and(|s| s != tx.status) {
            return false;
        }
        let Some(lower) = needle(&self.search) else {
            return true;
        };
        contains_ci(tx.description.as_deref(), &lower)
            || contains_ci(tx.reference.as_deref(), &lower)
            || contains_ci(tx.user_name.as_deref(), &lower)
            || contains_ci(tx.email.as_deref(), &lower)
            || contains_raw(tx.phone.as_deref(), self.search.trim())
    }

    /// Matching transactions, newest first. Undated entries go last.
    pub fn apply<'a>(&self, txs: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut hits: Vec<_> = txs.iter().filter(|t| self.matches(t)).collect();
        hits.sort_by_key(|t| Reverse(t.created_at));
        hits
    }
}

// ── Wallets ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletFilter {
    pub search: String,
}

impl WalletFilter {
    pub fn matches(&self, wallet: &UserWallet) -> bool {
        let Some(lower) = needle(&self.search) else {
            return true;
        };
        contains_ci(wallet.user_name.as_deref(), &lower)
            || contains_ci(wallet.email.as_deref(), &lower)
            || contains_raw(wallet.phone.as_deref(), self.search.trim())
    }

    pub fn apply<'a>(&self, wallets: &'a [UserWallet]) -> Vec<&'a UserWallet> {
        wallets.iter().filter(|w| self.matches(w)).collect()
    }
}

// ── Bundles ────────────────────────────────────────────────────────

/// Sort order for the bundle listing.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BundleSort {
    #[default]
    PriceAsc,
    PriceDesc,
    DataAsc,
    DataDesc,
}

impl BundleSort {
    fn compare(self, a: &DataBundle, b: &DataBundle) -> Ordering {
        let by_data = || match (&a.data_amount, &b.data_amount) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match self {
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::DataAsc => by_data(),
            Self::DataDesc => by_data().reverse(),
        }
    }

    /// Stable sort, so equal keys keep the backend's order.
    pub fn sort(self, bundles: &mut [DataBundle]) {
        bundles.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{BundleCategory, DataAmount, EntityId, Money, Network};

    fn order(id: &str, status: OrderStatus, phone: &str, user: &str) -> Order {
        Order {
            id: EntityId::new(id),
            network: Some(Network::Mtn),
            package_name: "MTN 1GB".into(),
            data_amount: None,
            recipient: phone.into(),
            amount: Money::from_major(6),
            status,
            reference: Some(format!("REF-{id}")),
            user_name: Some(user.into()),
            email: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn order_filter_is_a_logical_and() {
        let orders = [
            order("1", OrderStatus::Completed, "0241112222", "Ama"),
            order("2", OrderStatus::Pending, "0241112222", "Kofi"),
            order("3", OrderStatus::Completed, "0559998888", "Esi"),
        ];
        let filter = OrderFilter {
            status: Some(OrderStatus::Completed),
            search: "111".into(),
        };
        let ids: Vec<_> = filter.apply(&orders).iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["1"]);
    }

    #[test]
    fn order_search_is_case_insensitive_on_text() {
        let orders = [order("1", OrderStatus::Pending, "0241112222", "Ama Mensah")];
        let hit = OrderFilter {
            status: None,
            search: "  mensah ".into(),
        };
        let miss = OrderFilter {
            status: Some(OrderStatus::Failed),
            search: String::new(),
        };
        assert_eq!(hit.apply(&orders).len(), 1);
        assert!(miss.apply(&orders).is_empty());
        assert_eq!(OrderFilter::default().apply(&orders).len(), 1);
    }

    #[test]
    fn user_filter_combines_role_and_search() {
        let user = |id: &str, role: Role, name: &str| User {
            id: EntityId::new(id),
            user_name: name.into(),
            email: format!("{id}@example.com"),
            phone: Some("0201234567".into()),
            role,
            status: UserStatus::Active,
            wallet_balance: None,
            created_at: None,
        };
        let users = [
            user("a", Role::Agent, "Yaw"),
            user("b", Role::Customer, "Yaa"),
        ];
        let filter = UserFilter {
            role: Some(Role::Agent),
            search: "ya".into(),
            ..UserFilter::default()
        };
        assert_eq!(filter.apply(&users).len(), 1);
    }

    #[test]
    fn transactions_come_newest_first() {
        let tx = |id: &str, day: Option<u32>| Transaction {
            id: EntityId::new(id),
            kind: TransactionKind::Purchase,
            amount: Money::from_major(1),
            status: TransactionStatus::Completed,
            description: None,
            reference: None,
            user_name: None,
            email: None,
            phone: None,
            network: None,
            created_at: day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap()),
        };
        let txs = [tx("old", Some(1)), tx("undated", None), tx("new", Some(9))];
        let ids: Vec<_> = TransactionFilter::default()
            .apply(&txs)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, ["new", "old", "undated"]);
    }

    #[test]
    fn bundles_sort_by_price_and_data() {
        let bundle = |id: &str, data: &str, pesewas: i64| DataBundle {
            id: EntityId::new(id),
            network: Some(Network::Mtn),
            package_name: id.into(),
            data_amount: Some(DataAmount::parse(data)),
            price: Money::from_minor(pesewas),
            original_price: None,
            validity: None,
            category: BundleCategory::Regular,
            description: None,
        };
        let mut bundles = vec![
            bundle("big", "5GB", 2500),
            bundle("small", "500MB", 300),
            bundle("mid", "1GB", 600),
        ];
        BundleSort::PriceDesc.sort(&mut bundles);
        assert_eq!(bundles[0].id.as_str(), "big");
        BundleSort::DataAsc.sort(&mut bundles);
        let ids: Vec<_> = bundles.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["small", "mid", "big"]);
        assert_eq!("data-desc".parse::<BundleSort>().ok(), Some(BundleSort::DataDesc));
    }
}
