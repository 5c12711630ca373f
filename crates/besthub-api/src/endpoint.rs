// Static endpoint table
//
// Every backend resource the client talks to, grouped by namespace.
// Path parameters are carried as borrowed segments and percent-encoded
// when the URL is built, never spliced into a format string.

use std::fmt;

use reqwest::Method;

/// Top-level backend namespace (`/api/{namespace}/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Auth,
    Shop,
    Admin,
}

impl Namespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Shop => "shop",
            Self::Admin => "admin",
        }
    }
}

/// A named backend endpoint, with its path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    // ── auth ──
    Register,
    Login,
    Logout,
    CheckAuth,

    // ── shop ──
    BundlesByNetwork { network: &'a str },
    BundleDetails { bundle_id: &'a str },
    PlaceOrder,
    CreateOrder,
    CapturePayment,
    UserOrders { user_id: &'a str },
    OrderDetails { order_id: &'a str },
    WalletBalance { user_id: &'a str },
    WalletTransactions { user_id: &'a str },
    WalletTopUp,
    WalletVerifyTopUp,

    // ── admin ──
    Users,
    UserRole { user_id: &'a str },
    UserStatus { user_id: &'a str },
    DeleteUser { user_id: &'a str },
    NetworkOrders { network: &'a str },
    NetworkOrdersAll { network: &'a str },
    OrderStatus { network: &'a str, order_id: &'a str },
    BulkOrderStatus { network: &'a str },
    Prices,
    UpdatePrices { network: &'a str, role: &'a str },
    AddPackage { network: &'a str, role: &'a str },
    DeletePackage { network: &'a str, role: &'a str, package_id: &'a str },
    Wallets,
    AdjustWallet,
    AllWalletTransactions,
    Transactions,
    TransactionStats,
    Dashboard,
    Settings,
    UpdateSettings,
}

impl<'a> Endpoint<'a> {
    pub fn method(&self) -> Method {
        match self {
            Self::Register
            | Self::Login
            | Self::Logout
            | Self::PlaceOrder
            | Self::CreateOrder
            | Self::CapturePayment
            | Self::WalletTopUp
            | Self::WalletVerifyTopUp
            | Self::AddPackage { .. }
            | Self::AdjustWallet => Method::POST,
            Self::UserRole { .. }
            | Self::UserStatus { .. }
            | Self::UpdatePrices { .. }
            | Self::UpdateSettings => Method::PUT,
            Self::OrderStatus { .. } | Self::BulkOrderStatus { .. } => Method::PATCH,
            Self::DeleteUser { .. } | Self::DeletePackage { .. } => Method::DELETE,
            _ => Method::GET,
        }
    }

    pub fn namespace(&self) -> Namespace {
        match self {
            Self::Register | Self::Login | Self::Logout | Self::CheckAuth => Namespace::Auth,
            Self::BundlesByNetwork { .. }
            | Self::BundleDetails { .. }
            | Self::PlaceOrder
            | Self::CreateOrder
            | Self::CapturePayment
            | Self::UserOrders { .. }
            | Self::OrderDetails { .. }
            | Self::WalletBalance { .. }
            | Self::WalletTransactions { .. }
            | Self::WalletTopUp
            | Self::WalletVerifyTopUp => Namespace::Shop,
            _ => Namespace::Admin,
        }
    }

    /// Path segments below the namespace, parameters included.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::Register => vec!["register"],
            Self::Login => vec!["login"],
            Self::Logout => vec!["logout"],
            Self::CheckAuth => vec!["check-auth"],

            Self::BundlesByNetwork { network } => {
                vec!["products", "bundles", "network", network]
            }
            Self::BundleDetails { bundle_id } => vec!["products", "bundle", bundle_id],
            Self::PlaceOrder => vec!["orders"],
            Self::CreateOrder => vec!["orders", "create"],
            Self::CapturePayment => vec!["orders", "capture"],
            Self::UserOrders { user_id } => vec!["orders", "user", user_id],
            Self::OrderDetails { order_id } => vec!["orders", order_id],
            Self::WalletBalance { user_id } => vec!["wallet", "balance", user_id],
            Self::WalletTransactions { user_id } => vec!["wallet", "transactions", user_id],
            Self::WalletTopUp => vec!["wallet", "topup"],
            Self::WalletVerifyTopUp => vec!["wallet", "verify-topup"],

            Self::Users => vec!["users"],
            Self::UserRole { user_id } => vec!["users", user_id, "role"],
            Self::UserStatus { user_id } => vec!["users", user_id, "status"],
            Self::DeleteUser { user_id } => vec!["users", user_id],
            Self::NetworkOrders { network } => vec!["orders", network],
            Self::NetworkOrdersAll { network } => vec!["orders", network, "all"],
            Self::OrderStatus { network, order_id } => vec!["orders", network, order_id, "status"],
            Self::BulkOrderStatus { network } => vec!["orders", network, "bulk-status"],
            Self::Prices => vec!["prices"],
            Self::UpdatePrices { network, role } => vec!["prices", network, role],
            Self::AddPackage { network, role } => vec!["prices", network, role, "packages"],
            Self::DeletePackage {
                network,
                role,
                package_id,
            } => vec!["prices", network, role, "packages", package_id],
            Self::Wallets => vec!["wallets"],
            Self::AdjustWallet => vec!["wallets", "adjust-balance"],
            Self::AllWalletTransactions => vec!["wallets", "transactions"],
            Self::Transactions => vec!["transactions"],
            Self::TransactionStats => vec!["transactions", "stats"],
            Self::Dashboard => vec!["dashboard"],
            Self::Settings | Self::UpdateSettings => vec!["settings"],
        }
    }

    /// Human-readable path relative to the API root, e.g. `/auth/login`.
    pub fn path(&self) -> String {
        let mut out = format!("/{}", self.namespace().as_str());
        for segment in self.segments() {
            out.push('/');
            out.push_str(segment);
        }
        out
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_backend_layout() {
        assert_eq!(Endpoint::CheckAuth.path(), "/auth/check-auth");
        assert_eq!(
            Endpoint::BundlesByNetwork { network: "mtn" }.path(),
            "/shop/products/bundles/network/mtn"
        );
        assert_eq!(
            Endpoint::OrderStatus {
                network: "at",
                order_id: "o1"
            }
            .path(),
            "/admin/orders/at/o1/status"
        );
        assert_eq!(
            Endpoint::DeletePackage {
                network: "MTN",
                role: "agent",
                package_id: "p9"
            }
            .path(),
            "/admin/prices/MTN/agent/packages/p9"
        );
    }

    #[test]
    fn methods_match_verbs() {
        assert_eq!(Endpoint::Login.method(), Method::POST);
        assert_eq!(Endpoint::Settings.method(), Method::GET);
        assert_eq!(Endpoint::UpdateSettings.method(), Method::PUT);
        assert_eq!(
            Endpoint::BulkOrderStatus { network: "mtn" }.method(),
            Method::PATCH
        );
        assert_eq!(Endpoint::DeleteUser { user_id: "u" }.method(), Method::DELETE);
        assert_eq!(Endpoint::WalletTopUp.to_string(), "POST /shop/wallet/topup");
    }
}
