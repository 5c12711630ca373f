// Admin endpoints
//
// Users, per-network order queues, the price book, wallets, transactions,
// the dashboard and platform settings. Every call here needs an admin
// session; a non-admin session gets `Error::Forbidden`.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{
    ApiDashboard, ApiOrder, ApiPriceBook, ApiPricedPackage, ApiSettings, ApiTransaction,
    ApiTransactionStats, ApiUser, ApiWallet,
};

impl ApiClient {
    // ── Users ────────────────────────────────────────────────────────

    /// `GET /api/admin/users`
    pub async fn list_users(&self) -> Result<Vec<ApiUser>, Error> {
        self.call(Endpoint::Users).await?.data_or_default()
    }

    /// `PUT /api/admin/users/{id}/role` with `{"role": "..."}`
    pub async fn set_user_role(&self, user_id: &str, role: &str) -> Result<Option<ApiUser>, Error> {
        debug!(user_id, role, "updating user role");
        let env = self
            .call_with(Endpoint::UserRole { user_id }, &json!({ "role": role }))
            .await?;
        Ok(env.data_or_default::<Option<ApiUser>>().unwrap_or(None))
    }

    /// `PUT /api/admin/users/{id}/status` with `{"status": "..."}`
    pub async fn set_user_status(
        &self,
        user_id: &str,
        status: &str,
    ) -> Result<Option<ApiUser>, Error> {
        debug!(user_id, status, "updating user status");
        let env = self
            .call_with(Endpoint::UserStatus { user_id }, &json!({ "status": status }))
            .await?;
        Ok(env.data_or_default::<Option<ApiUser>>().unwrap_or(None))
    }

    /// `DELETE /api/admin/users/{id}`
    pub async fn delete_user(&self, user_id: &str) -> Result<(), Error> {
        debug!(user_id, "deleting user");
        self.call(Endpoint::DeleteUser { user_id }).await?;
        Ok(())
    }

    // ── Orders ───────────────────────────────────────────────────────

    /// Pending queue for one network. `network` is the admin slug
    /// (`mtn`, `telecel`, `at`).
    ///
    /// `GET /api/admin/orders/{network}`
    pub async fn list_network_orders(&self, network: &str) -> Result<Vec<ApiOrder>, Error> {
        self.call(Endpoint::NetworkOrders { network })
            .await?
            .data_or_default()
    }

    /// Full history for one network.
    ///
    /// `GET /api/admin/orders/{network}/all`
    pub async fn list_all_network_orders(&self, network: &str) -> Result<Vec<ApiOrder>, Error> {
        self.call(Endpoint::NetworkOrdersAll { network })
            .await?
            .data_or_default()
    }

    /// `PATCH /api/admin/orders/{network}/{orderId}/status` with `{"status": "..."}`
    pub async fn set_order_status(
        &self,
        network: &str,
        order_id: &str,
        status: &str,
    ) -> Result<(), Error> {
        debug!(network, order_id, status, "updating order status");
        self.call_with(
            Endpoint::OrderStatus { network, order_id },
            &json!({ "status": status }),
        )
        .await?;
        Ok(())
    }

    /// Apply one status to many orders. Returns the backend's
    /// `updatedCount` when it reports one.
    ///
    /// `PATCH /api/admin/orders/{network}/bulk-status` with `{"orderIds": [..], "status": "..."}`
    pub async fn set_order_status_bulk(
        &self,
        network: &str,
        order_ids: &[&str],
        status: &str,
    ) -> Result<Option<u64>, Error> {
        debug!(network, count = order_ids.len(), status, "bulk updating order status");
        let env = self
            .call_with(
                Endpoint::BulkOrderStatus { network },
                &json!({ "orderIds": order_ids, "status": status }),
            )
            .await?;
        env.field("updatedCount")
    }

    // ── Prices ───────────────────────────────────────────────────────

    /// `GET /api/admin/prices`
    pub async fn price_book(&self) -> Result<ApiPriceBook, Error> {
        self.call(Endpoint::Prices).await?.data_or_default()
    }

    /// Replace one network/role price table. Returns the stored table.
    ///
    /// `PUT /api/admin/prices/{network}/{role}` with `{"packages": [..]}`
    pub async fn replace_prices(
        &self,
        network: &str,
        role: &str,
        packages: &[ApiPricedPackage],
    ) -> Result<Vec<ApiPricedPackage>, Error> {
        debug!(network, role, count = packages.len(), "replacing price table");
        self.call_with(
            Endpoint::UpdatePrices { network, role },
            &json!({ "packages": packages }),
        )
        .await?
        .data_or_default()
    }

    /// Add one package to a price table. Returns the stored package.
    ///
    /// `POST /api/admin/prices/{network}/{role}/packages`
    pub async fn add_priced_package(
        &self,
        network: &str,
        role: &str,
        package: &ApiPricedPackage,
    ) -> Result<ApiPricedPackage, Error> {
        debug!(network, role, "adding priced package");
        self.call_with(Endpoint::AddPackage { network, role }, package)
            .await?
            .data()
    }

    /// `DELETE /api/admin/prices/{network}/{role}/packages/{id}`
    pub async fn delete_priced_package(
        &self,
        network: &str,
        role: &str,
        package_id: &str,
    ) -> Result<(), Error> {
        debug!(network, role, package_id, "deleting priced package");
        self.call(Endpoint::DeletePackage {
            network,
            role,
            package_id,
        })
        .await?;
        Ok(())
    }

    // ── Wallets ──────────────────────────────────────────────────────

    /// `GET /api/admin/wallets`
    pub async fn list_wallets(&self) -> Result<Vec<ApiWallet>, Error> {
        self.call(Endpoint::Wallets).await?.data_or_default()
    }

    /// Credit (positive) or debit (negative) a wallet. Returns the wallet
    /// as the backend stored it.
    ///
    /// `POST /api/admin/wallets/adjust-balance` with `{"userId", "amount", "description"}`
    pub async fn adjust_wallet(
        &self,
        user_id: &str,
        amount: &Value,
        description: &str,
    ) -> Result<ApiWallet, Error> {
        debug!(user_id, description, "adjusting wallet balance");
        let env = self
            .call_with(
                Endpoint::AdjustWallet,
                &json!({
                    "userId": user_id,
                    "amount": amount,
                    "description": description,
                }),
            )
            .await?;
        env.field::<ApiWallet>("wallet")?
            .ok_or_else(|| Error::Deserialization {
                message: "adjust-balance response has no wallet".into(),
                body: serde_json::to_string(&env).unwrap_or_default(),
            })
    }

    /// `GET /api/admin/wallets/transactions`
    pub async fn list_all_wallet_transactions(&self) -> Result<Vec<ApiTransaction>, Error> {
        self.call(Endpoint::AllWalletTransactions)
            .await?
            .data_or_default()
    }

    // ── Transactions & dashboard ─────────────────────────────────────

    /// `GET /api/admin/transactions`
    pub async fn list_transactions(&self) -> Result<Vec<ApiTransaction>, Error> {
        self.call(Endpoint::Transactions).await?.data_or_default()
    }

    /// `GET /api/admin/transactions/stats`
    pub async fn transaction_stats(&self) -> Result<ApiTransactionStats, Error> {
        self.call(Endpoint::TransactionStats)
            .await?
            .data_or_default()
    }

    /// `GET /api/admin/dashboard`
    pub async fn dashboard(&self) -> Result<ApiDashboard, Error> {
        self.call(Endpoint::Dashboard).await?.data_or_default()
    }

    // ── Settings ─────────────────────────────────────────────────────

    /// `GET /api/admin/settings`
    pub async fn settings(&self) -> Result<ApiSettings, Error> {
        self.call(Endpoint::Settings).await?.data_or_default()
    }

    /// `PUT /api/admin/settings`. Returns the stored settings, or the
    /// submitted ones when the backend echoes nothing.
    pub async fn update_settings<S>(&self, settings: &S) -> Result<Option<ApiSettings>, Error>
    where
        S: Serialize + Sync,
    {
        debug!("saving platform settings");
        let env = self.call_with(Endpoint::UpdateSettings, settings).await?;
        env.data_or_default()
    }
}

