// Backend wire types
//
// The backend is loose about field names (`phone` vs `phoneNumber`,
// `status` vs `orderStatus`, `_id` vs `id`) and about numeric encoding
// (amounts arrive as numbers or numeric strings). These structs accept
// every spelling seen in practice and default everything optional.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// ── Amount ──────────────────────────────────────────────────────────

/// A decimal amount in major currency units, kept as its textual form so
/// no precision is lost before the domain layer converts it to minor units.
///
/// Deserializes from a JSON number or a numeric string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Amount(String);

impl Amount {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<f64>() {
            Ok(n) => serializer.serialize_f64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Ok(Amount(v.trim().to_owned()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
                Ok(Amount::default())
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

// ── Auth ────────────────────────────────────────────────────────────

/// User record as returned by auth and admin endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default, alias = "username", alias = "name")]
    pub user_name: String,
    #[serde(default, alias = "userEmail")]
    pub email: String,
    #[serde(default, alias = "userPhone", alias = "phoneNumber")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "balance")]
    pub wallet_balance: Option<Amount>,
    #[serde(default, alias = "registrationDate")]
    pub created_at: Option<String>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody<'a> {
    pub user_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub role: &'a str,
    pub password: &'a str,
}

// ── Shop ────────────────────────────────────────────────────────────

/// A purchasable data bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBundle {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default, alias = "name")]
    pub package_name: String,
    #[serde(default)]
    pub data_amount: Option<String>,
    #[serde(default, alias = "sellingPrice")]
    pub price: Amount,
    #[serde(default)]
    pub original_price: Option<Amount>,
    #[serde(default)]
    pub validity: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// An order as the shop and admin endpoints return it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOrder {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default, alias = "package", alias = "productName")]
    pub package_name: Option<String>,
    #[serde(default)]
    pub data_amount: Option<String>,
    #[serde(default, alias = "phone", alias = "recipientPhone")]
    pub phone_number: Option<String>,
    #[serde(default, alias = "price")]
    pub amount: Option<Amount>,
    #[serde(default, alias = "orderStatus")]
    pub status: Option<String>,
    #[serde(default, alias = "transactionId")]
    pub reference: Option<String>,
    /// Either a display name or a populated user document.
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "orderDate", alias = "date")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body shared by `POST /shop/orders` (wallet) and `POST /shop/orders/create` (card).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBody {
    pub package_id: String,
    pub package_name: String,
    pub phone_number: String,
    pub user_id: String,
    pub network: String,
    /// Major units, as the order endpoints expect.
    pub amount: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Redirect handle returned by `POST /shop/orders/create`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckoutSession {
    pub authorization_url: String,
    pub order_id: Option<String>,
}

/// A wallet or platform transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTransaction {
    #[serde(rename = "_id", alias = "id", alias = "transactionId", default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, alias = "userEmail")]
    pub email: Option<String>,
    #[serde(default, alias = "phoneNumber", alias = "recipientPhone")]
    pub phone: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default, alias = "date")]
    pub created_at: Option<String>,
}

/// Payment handle returned by `POST /shop/wallet/topup`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopUpInit {
    pub authorization_url: String,
    pub reference: Option<String>,
}

/// Outcome of `POST /shop/wallet/verify-topup`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedTopUp {
    #[serde(default)]
    pub new_balance: Amount,
    #[serde(default)]
    pub transaction: Option<ApiTransaction>,
}

// ── Admin ───────────────────────────────────────────────────────────

/// Row of `GET /admin/wallets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiWallet {
    #[serde(default, alias = "_id")]
    pub user_id: String,
    #[serde(default)]
    pub balance: Amount,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_phone: Option<String>,
}

/// A priced package inside the admin price book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPricedPackage {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub data_amount: Option<String>,
    #[serde(default)]
    pub price: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity: Option<String>,
}

/// `GET /admin/prices`: `{ "MTN": { "customer": [..], "agent": [..] }, ... }`.
pub type ApiPriceBook = BTreeMap<String, BTreeMap<String, Vec<ApiPricedPackage>>>;

/// `GET /admin/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDashboard {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub active_customers: u64,
    #[serde(default)]
    pub total_transactions: u64,
    #[serde(default)]
    pub today_orders: u64,
    #[serde(default)]
    pub total_revenue: Amount,
    #[serde(default)]
    pub today_sales: Amount,
    #[serde(default)]
    pub total_customer_balance: Amount,
    #[serde(default)]
    pub mtn_sales: Amount,
    #[serde(default)]
    pub telecel_sales: Amount,
    #[serde(default)]
    pub at_sales: Amount,
}

/// `GET /admin/transactions/stats`. Only the commonly reported totals are
/// typed; anything else the backend adds is kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTransactionStats {
    #[serde(default)]
    pub total_transactions: u64,
    #[serde(default)]
    pub total_amount: Amount,
    #[serde(default)]
    pub total_topups: Amount,
    #[serde(default)]
    pub total_purchases: Amount,
    #[serde(default)]
    pub today_transactions: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// `GET /admin/settings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    pub mtn_available: Option<bool>,
    pub telecel_available: Option<bool>,
    pub at_available: Option<bool>,
    pub maintenance_mode: Option<bool>,
    pub new_registrations: Option<bool>,
    pub auto_approve_agents: Option<bool>,
    pub email_notifications: Option<bool>,
    pub low_balance_alerts: Option<bool>,
    pub system_alerts: Option<bool>,
    pub agent_commission: Option<Amount>,
    pub wholesaler_commission: Option<Amount>,
    pub min_topup_amount: Option<Amount>,
    pub max_topup_amount: Option<Amount>,
    pub daily_user_limit: Option<Amount>,
}
