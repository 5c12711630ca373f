// ── API-to-domain type conversions ──
//
// Bridges raw `besthub_api::models` wire types into `besthub_core::model`.
// Each `From` impl normalizes field spellings, parses amounts into `Money`,
// and fills sensible defaults for missing optional data. Unparseable
// values are logged and defaulted rather than failing the whole listing.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::warn;

use besthub_api::models::{
    Amount, ApiBundle, ApiDashboard, ApiOrder, ApiPriceBook, ApiPricedPackage, ApiSettings,
    ApiTransaction, ApiTransactionStats, ApiUser, ApiWallet, VerifiedTopUp,
};

use crate::model::{
    BundleCategory, DashboardSummary, DataAmount, DataBundle, EntityId, Money, Network, Order,
    OrderStatus, PriceBook, PricedPackage, Role, SystemSettings, TopUpReceipt, Transaction,
    TransactionKind, TransactionStats, TransactionStatus, User, UserStatus, UserWallet,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Backend amount to `Money`. Empty amounts are zero; garbage is logged
/// and treated as zero so one bad row does not hide the rest.
pub(crate) fn money(amount: &Amount) -> Money {
    if amount.is_empty() {
        return Money::ZERO;
    }
    Money::from_major_lenient(amount.as_str()).unwrap_or_else(|e| {
        warn!(amount = amount.as_str(), error = %e, "unparseable amount from backend");
        Money::ZERO
    })
}

fn optional_money(amount: Option<&Amount>) -> Option<Money> {
    amount.filter(|a| !a.is_empty()).map(money)
}

/// `Money` back to the backend's major-unit wire form.
pub(crate) fn amount(money: Money) -> Amount {
    Amount::new(money.major_string())
}

/// ISO-8601 timestamps (`2024-05-01T09:30:00.000Z`) or bare dates.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a lowercase backend enum, logging and defaulting unknown values.
fn parse_or_default<T>(raw: Option<&str>, what: &'static str) -> T
where
    T: std::str::FromStr + Default,
{
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return T::default();
    };
    raw.parse().unwrap_or_else(|_| {
        warn!(value = raw, what, "unknown value from backend, using default");
        T::default()
    })
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

/// `"12.5"` → 12.5; commissions are percentages, not money.
fn percent(raw: Option<&Amount>, fallback: f64) -> f64 {
    raw.and_then(|a| a.as_str().parse::<f64>().ok())
        .unwrap_or(fallback)
}

// ── Users ──────────────────────────────────────────────────────────

impl From<ApiUser> for User {
    fn from(u: ApiUser) -> Self {
        Self {
            id: EntityId::from(u.id),
            user_name: u.user_name,
            email: u.email,
            phone: non_empty(u.phone),
            role: parse_or_default::<Role>(u.role.as_deref(), "role"),
            status: parse_or_default::<UserStatus>(u.status.as_deref(), "user status"),
            wallet_balance: optional_money(u.wallet_balance.as_ref()),
            created_at: parse_datetime(u.created_at.as_deref()),
        }
    }
}

// ── Bundles ────────────────────────────────────────────────────────

impl From<ApiBundle> for DataBundle {
    fn from(b: ApiBundle) -> Self {
        let network = Network::detect(b.network.as_deref(), Some(&b.package_name));
        Self {
            id: EntityId::from(b.id),
            network,
            data_amount: non_empty(b.data_amount).map(|d| DataAmount::parse(&d)),
            price: money(&b.price),
            original_price: optional_money(b.original_price.as_ref()),
            validity: non_empty(b.validity),
            category: parse_or_default::<BundleCategory>(b.category.as_deref(), "category"),
            description: non_empty(b.description),
            package_name: b.package_name,
        }
    }
}

// ── Orders ─────────────────────────────────────────────────────────

/// `user` is either an id string or a populated user document.
fn populated_user_field(user: Option<&Value>, keys: &[&str]) -> Option<String> {
    let obj = user?.as_object()?;
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::to_owned)
}

impl From<ApiOrder> for Order {
    fn from(o: ApiOrder) -> Self {
        let package_name = o.package_name.unwrap_or_default();
        let user_name = non_empty(o.user_name)
            .or_else(|| populated_user_field(o.user.as_ref(), &["userName", "username", "name"]));
        let email =
            non_empty(o.email).or_else(|| populated_user_field(o.user.as_ref(), &["email"]));
        Self {
            id: EntityId::from(o.id),
            network: Network::detect(o.network.as_deref(), Some(&package_name)),
            data_amount: non_empty(o.data_amount).map(|d| DataAmount::parse(&d)),
            recipient: o.phone_number.unwrap_or_default(),
            amount: o.amount.as_ref().map_or(Money::ZERO, money),
            status: parse_or_default::<OrderStatus>(o.status.as_deref(), "order status"),
            reference: non_empty(o.reference),
            user_name,
            email,
            created_at: parse_datetime(o.created_at.as_deref()),
            updated_at: parse_datetime(o.updated_at.as_deref()),
            package_name,
        }
    }
}

// ── Transactions ───────────────────────────────────────────────────

impl From<ApiTransaction> for Transaction {
    fn from(t: ApiTransaction) -> Self {
        Self {
            id: EntityId::from(t.id),
            kind: parse_or_default::<TransactionKind>(t.kind.as_deref(), "transaction type"),
            amount: money(&t.amount),
            status: parse_or_default::<TransactionStatus>(
                t.status.as_deref(),
                "transaction status",
            ),
            network: Network::detect(t.network.as_deref(), t.description.as_deref()),
            description: non_empty(t.description),
            reference: non_empty(t.reference),
            user_name: non_empty(t.user_name),
            email: non_empty(t.email),
            phone: non_empty(t.phone),
            created_at: parse_datetime(t.created_at.as_deref()),
        }
    }
}

// ── Wallets ────────────────────────────────────────────────────────

impl From<ApiWallet> for UserWallet {
    fn from(w: ApiWallet) -> Self {
        Self {
            user_id: EntityId::from(w.user_id),
            user_name: non_empty(w.user_name),
            email: non_empty(w.user_email),
            phone: non_empty(w.user_phone),
            balance: money(&w.balance),
        }
    }
}

impl From<VerifiedTopUp> for TopUpReceipt {
    fn from(v: VerifiedTopUp) -> Self {
        Self {
            new_balance: money(&v.new_balance),
            credited: v.transaction.map(Transaction::from),
        }
    }
}

// ── Prices ─────────────────────────────────────────────────────────

impl From<ApiPricedPackage> for PricedPackage {
    fn from(p: ApiPricedPackage) -> Self {
        Self {
            id: EntityId::from(p.id),
            package_name: p.package_name.unwrap_or_default(),
            data_amount: non_empty(p.data_amount).map(|d| DataAmount::parse(&d)),
            price: money(&p.price),
            validity: non_empty(p.validity),
        }
    }
}

impl From<&PricedPackage> for ApiPricedPackage {
    fn from(p: &PricedPackage) -> Self {
        Self {
            id: p.id.to_string(),
            package_name: Some(p.package_name.clone()),
            data_amount: p.data_amount.as_ref().map(|d| d.label.clone()),
            price: amount(p.price),
            validity: p.validity.clone(),
        }
    }
}

/// Unknown network or role keys are skipped with a warning.
pub(crate) fn price_book(raw: ApiPriceBook) -> PriceBook {
    let mut book = PriceBook::default();
    for (network_key, by_role) in raw {
        let Ok(network) = network_key.parse::<Network>() else {
            warn!(network = network_key, "skipping price table for unknown network");
            continue;
        };
        for (role_key, packages) in by_role {
            let Ok(role) = role_key.parse::<Role>() else {
                warn!(role = role_key, "skipping price table for unknown role");
                continue;
            };
            book.set_table(
                network,
                role,
                packages.into_iter().map(PricedPackage::from).collect(),
            );
        }
    }
    book
}

// ── Dashboard ──────────────────────────────────────────────────────

impl From<ApiDashboard> for DashboardSummary {
    fn from(d: ApiDashboard) -> Self {
        let sales_by_network = BTreeMap::from([
            (Network::Mtn, money(&d.mtn_sales)),
            (Network::Telecel, money(&d.telecel_sales)),
            (Network::AirtelTigo, money(&d.at_sales)),
        ]);
        Self {
            total_users: d.total_users,
            total_customers: d.total_customers,
            active_customers: d.active_customers,
            total_transactions: d.total_transactions,
            today_orders: d.today_orders,
            total_revenue: money(&d.total_revenue),
            today_sales: money(&d.today_sales),
            total_customer_balance: money(&d.total_customer_balance),
            sales_by_network,
        }
    }
}

impl From<ApiTransactionStats> for TransactionStats {
    fn from(s: ApiTransactionStats) -> Self {
        Self {
            total_transactions: s.total_transactions,
            total_amount: money(&s.total_amount),
            total_topups: money(&s.total_topups),
            total_purchases: money(&s.total_purchases),
            today_transactions: s.today_transactions,
            extra: s.extra,
        }
    }
}

// ── Settings ───────────────────────────────────────────────────────

/// Missing fields take the platform defaults.
impl From<ApiSettings> for SystemSettings {
    fn from(s: ApiSettings) -> Self {
        let d = SystemSettings::default();
        Self {
            mtn_available: s.mtn_available.unwrap_or(d.mtn_available),
            telecel_available: s.telecel_available.unwrap_or(d.telecel_available),
            airteltigo_available: s.at_available.unwrap_or(d.airteltigo_available),
            maintenance_mode: s.maintenance_mode.unwrap_or(d.maintenance_mode),
            new_registrations: s.new_registrations.unwrap_or(d.new_registrations),
            auto_approve_agents: s.auto_approve_agents.unwrap_or(d.auto_approve_agents),
            email_notifications: s.email_notifications.unwrap_or(d.email_notifications),
            low_balance_alerts: s.low_balance_alerts.unwrap_or(d.low_balance_alerts),
            system_alerts: s.system_alerts.unwrap_or(d.system_alerts),
            agent_commission: percent(s.agent_commission.as_ref(), d.agent_commission),
            wholesaler_commission: percent(
                s.wholesaler_commission.as_ref(),
                d.wholesaler_commission,
            ),
            min_topup_amount: optional_money(s.min_topup_amount.as_ref())
                .unwrap_or(d.min_topup_amount),
            max_topup_amount: optional_money(s.max_topup_amount.as_ref())
                .unwrap_or(d.max_topup_amount),
            daily_user_limit: optional_money(s.daily_user_limit.as_ref())
                .unwrap_or(d.daily_user_limit),
        }
    }
}

impl From<&SystemSettings> for ApiSettings {
    fn from(s: &SystemSettings) -> Self {
        Self {
            mtn_available: Some(s.mtn_available),
            telecel_available: Some(s.telecel_available),
            at_available: Some(s.airteltigo_available),
            maintenance_mode: Some(s.maintenance_mode),
            new_registrations: Some(s.new_registrations),
            auto_approve_agents: Some(s.auto_approve_agents),
            email_notifications: Some(s.email_notifications),
            low_balance_alerts: Some(s.low_balance_alerts),
            system_alerts: Some(s.system_alerts),
            agent_commission: Some(Amount::new(s.agent_commission.to_string())),
            wholesaler_commission: Some(Amount::new(s.wholesaler_commission.to_string())),
            min_topup_amount: Some(amount(s.min_topup_amount)),
            max_topup_amount: Some(amount(s.max_topup_amount)),
            daily_user_limit: Some(amount(s.daily_user_limit)),
        }
    }
}
