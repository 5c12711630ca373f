// ── Domain state containers ──
//
// One container per domain, each a thin owner of one or more `Slice`s.
// `Store` builds them all around a shared `ApiClient` and session; there
// is no global instance.

mod admin_dashboard;
mod admin_orders;
mod admin_prices;
mod admin_settings;
mod admin_transactions;
mod admin_users;
mod admin_wallets;
mod auth;
mod products;
mod shop_dashboard;
mod shop_orders;
mod slice;
mod wallet;

use std::collections::BTreeMap;
use std::sync::Arc;

use strum::IntoEnumIterator;
use tracing::debug;

use besthub_api::ApiClient;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{Network, Role, User};
use crate::session::SessionStore;

pub use admin_dashboard::AdminDashboard;
pub use admin_orders::AdminOrders;
pub use admin_prices::AdminPrices;
pub use admin_settings::AdminSettings;
pub use admin_transactions::AdminTransactions;
pub use admin_users::AdminUsers;
pub use admin_wallets::AdminWallets;
pub use auth::Auth;
pub use products::Products;
pub use shop_dashboard::{RECENT_ORDERS, ShopDashboard, ShopSummary};
pub use shop_orders::ShopOrders;
pub use slice::{FetchTicket, Slice, SliceError, SliceState, UpdateTicket};
pub use wallet::Wallet;

// ── Store ────────────────────────────────────────────────────────

/// Every domain container, wired to one backend connection.
///
/// Cheaply cloneable via `Arc<StoreInner>`.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    auth: Auth,
    products: Products,
    wallet: Arc<Wallet>,
    shop_orders: Arc<ShopOrders>,
    shop_dashboard: ShopDashboard,
    admin_users: AdminUsers,
    admin_orders: BTreeMap<Network, AdminOrders>,
    admin_prices: AdminPrices,
    admin_wallets: AdminWallets,
    admin_transactions: AdminTransactions,
    admin_dashboard: AdminDashboard,
    admin_settings: AdminSettings,
}

impl Store {
    pub fn new(api: Arc<ApiClient>, session: SessionStore) -> Self {
        let session = Arc::new(session);
        let wallet = Arc::new(Wallet::new(Arc::clone(&api), Arc::clone(&session)));
        let shop_orders = Arc::new(ShopOrders::new(
            Arc::clone(&api),
            Arc::clone(&session),
            Arc::clone(&wallet),
        ));
        let admin_orders = Network::iter()
            .map(|network| (network, AdminOrders::new(Arc::clone(&api), network)))
            .collect();

        Self {
            inner: Arc::new(StoreInner {
                auth: Auth::new(Arc::clone(&api), Arc::clone(&session)),
                products: Products::new(Arc::clone(&api)),
                shop_dashboard: ShopDashboard::new(Arc::clone(&wallet), Arc::clone(&shop_orders)),
                admin_users: AdminUsers::new(Arc::clone(&api)),
                admin_orders,
                admin_prices: AdminPrices::new(Arc::clone(&api)),
                admin_wallets: AdminWallets::new(Arc::clone(&api)),
                admin_transactions: AdminTransactions::new(Arc::clone(&api)),
                admin_dashboard: AdminDashboard::new(Arc::clone(&api)),
                admin_settings: AdminSettings::new(Arc::clone(&api)),
                wallet,
                shop_orders,
                session,
                api,
            }),
        }
    }

    /// Build the HTTP client from `config`, open the persisted session and
    /// hand its cookie back to the client. Makes no network call.
    pub fn connect(config: &ClientConfig) -> Result<Self, CoreError> {
        let api = ApiClient::new(config.base_url.clone(), &config.transport())?;
        if let Some(token) = &config.token {
            api.set_bearer_token(token.clone());
        }
        let session = match &config.session_file {
            Some(path) => SessionStore::open(path)?,
            None => SessionStore::in_memory(),
        };
        if let Some(cookie) = session.cookie() {
            debug!("restoring persisted session cookie");
            api.restore_cookies(&cookie);
        }
        Ok(Self::new(Arc::new(api), session))
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.inner.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    // ── Containers ───────────────────────────────────────────────

    pub fn auth(&self) -> &Auth {
        &self.inner.auth
    }

    pub fn products(&self) -> &Products {
        &self.inner.products
    }

    pub fn wallet(&self) -> &Wallet {
        &self.inner.wallet
    }

    pub fn shop_orders(&self) -> &ShopOrders {
        &self.inner.shop_orders
    }

    pub fn shop_dashboard(&self) -> &ShopDashboard {
        &self.inner.shop_dashboard
    }

    pub fn admin_users(&self) -> &AdminUsers {
        &self.inner.admin_users
    }

    /// The order queue for one network.
    pub fn admin_orders(&self, network: Network) -> &AdminOrders {
        // Populated for every network in `new`.
        &self.inner.admin_orders[&network]
    }

    pub fn admin_prices(&self) -> &AdminPrices {
        &self.inner.admin_prices
    }

    pub fn admin_wallets(&self) -> &AdminWallets {
        &self.inner.admin_wallets
    }

    pub fn admin_transactions(&self) -> &AdminTransactions {
        &self.inner.admin_transactions
    }

    pub fn admin_dashboard(&self) -> &AdminDashboard {
        &self.inner.admin_dashboard
    }

    pub fn admin_settings(&self) -> &AdminSettings {
        &self.inner.admin_settings
    }

    // ── Access gate ──────────────────────────────────────────────

    /// The signed-in user, provided they may act as `role`.
    ///
    /// `Role::Customer` only needs a session. Any other role needs an exact
    /// match, and admins pass every gate. When no user is cached the
    /// backend is asked first.
    pub async fn require_role(&self, role: Role) -> Result<User, CoreError> {
        let user = match self.inner.auth.current_user() {
            Some(user) => Some(user),
            None => self.inner.auth.check_auth().await?,
        };
        let Some(user) = user else {
            return Err(CoreError::SessionExpired {
                message: "not signed in".into(),
            });
        };
        if role == Role::Customer || user.role == role || user.is_admin() {
            Ok(user)
        } else {
            Err(CoreError::Forbidden {
                message: format!("{role} access required, signed in as {}", user.role),
            })
        }
    }
}
