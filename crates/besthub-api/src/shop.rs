// Shop endpoints: bundles, orders, wallet
//
// Order amounts travel in major units; top-up initiation travels in minor
// units (pesewas). Callers pass exactly what the endpoint expects.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{
    Amount, ApiBundle, ApiOrder, ApiTransaction, CheckoutSession, OrderBody, TopUpInit,
    VerifiedTopUp,
};

impl ApiClient {
    // ── Bundles ──────────────────────────────────────────────────────

    /// List bundles for one network.
    ///
    /// `GET /api/shop/products/bundles/network/{network}`
    pub async fn list_bundles(&self, network: &str) -> Result<Vec<ApiBundle>, Error> {
        debug!(network, "listing bundles");
        self.call(Endpoint::BundlesByNetwork { network })
            .await?
            .data_or_default()
    }

    /// Fetch one bundle.
    ///
    /// `GET /api/shop/products/bundle/{id}`
    pub async fn get_bundle(&self, bundle_id: &str) -> Result<ApiBundle, Error> {
        self.call(Endpoint::BundleDetails { bundle_id })
            .await?
            .data()
    }

    // ── Orders ───────────────────────────────────────────────────────

    /// Buy a bundle from the wallet balance.
    ///
    /// `POST /api/shop/orders`
    pub async fn place_order(&self, body: &OrderBody) -> Result<Option<ApiOrder>, Error> {
        debug!(
            network = body.network,
            package = body.package_name,
            "placing wallet order"
        );
        let env = self.call_with(Endpoint::PlaceOrder, body).await?;
        // The order sits either under `order` or directly in `data`.
        if let Ok(Some(order)) = env.field::<ApiOrder>("order") {
            return Ok(Some(order));
        }
        Ok(env.data_or_default::<Option<ApiOrder>>().unwrap_or(None))
    }

    /// Start a card checkout. The backend answers with a payment redirect
    /// and the id of the pending order.
    ///
    /// `POST /api/shop/orders/create`
    pub async fn create_order(&self, body: &OrderBody) -> Result<CheckoutSession, Error> {
        debug!(network = body.network, "creating card order");
        let env = self.call_with(Endpoint::CreateOrder, body).await?;
        let authorization_url: String =
            env.field("authorizationURL")?
                .ok_or_else(|| Error::Deserialization {
                    message: "checkout response has no authorizationURL".into(),
                    body: serde_json::to_string(&env).unwrap_or_default(),
                })?;
        Ok(CheckoutSession {
            authorization_url,
            order_id: env.field("orderId")?,
        })
    }

    /// Confirm a card payment against its order.
    ///
    /// `POST /api/shop/orders/capture` with `{"reference": "...", "orderId": "..."}`
    pub async fn capture_payment(
        &self,
        reference: &str,
        order_id: &str,
    ) -> Result<Option<ApiOrder>, Error> {
        debug!(reference, order_id, "capturing payment");
        let env = self
            .call_with(
                Endpoint::CapturePayment,
                &json!({ "reference": reference, "orderId": order_id }),
            )
            .await?;
        Ok(env.data_or_default::<Option<ApiOrder>>().unwrap_or(None))
    }

    /// Orders placed by one user.
    ///
    /// `GET /api/shop/orders/user/{userId}`
    pub async fn list_user_orders(&self, user_id: &str) -> Result<Vec<ApiOrder>, Error> {
        self.call(Endpoint::UserOrders { user_id })
            .await?
            .data_or_default()
    }

    /// One order.
    ///
    /// `GET /api/shop/orders/{orderId}`
    pub async fn get_order(&self, order_id: &str) -> Result<ApiOrder, Error> {
        self.call(Endpoint::OrderDetails { order_id }).await?.data()
    }

    // ── Wallet ───────────────────────────────────────────────────────

    /// Current wallet balance in major units.
    ///
    /// `GET /api/shop/wallet/balance/{userId}`. The balance may sit in
    /// `data.balance` or at the top level.
    pub async fn wallet_balance(&self, user_id: &str) -> Result<Amount, Error> {
        let env = self.call(Endpoint::WalletBalance { user_id }).await?;
        Ok(env.field("balance")?.unwrap_or_default())
    }

    /// Wallet history for one user.
    ///
    /// `GET /api/shop/wallet/transactions/{userId}`
    pub async fn list_wallet_transactions(
        &self,
        user_id: &str,
    ) -> Result<Vec<ApiTransaction>, Error> {
        let env = self.call(Endpoint::WalletTransactions { user_id }).await?;
        if let Some(list) = env.field::<Vec<ApiTransaction>>("transactions")? {
            return Ok(list);
        }
        env.data_or_default()
    }

    /// Start a wallet top-up. `amount_minor` is in pesewas.
    ///
    /// `POST /api/shop/wallet/topup` with `{"amount": 5000, "email": "..."}`
    pub async fn top_up(&self, amount_minor: i64, email: &str) -> Result<TopUpInit, Error> {
        debug!(amount_minor, email, "initiating top-up");
        let env = self
            .call_with(
                Endpoint::WalletTopUp,
                &json!({ "amount": amount_minor, "email": email }),
            )
            .await?;
        let authorization_url: String =
            env.field("authorizationURL")?
                .ok_or_else(|| Error::Deserialization {
                    message: "top-up response has no authorizationURL".into(),
                    body: serde_json::to_string(&env).unwrap_or_default(),
                })?;
        Ok(TopUpInit {
            authorization_url,
            reference: env.field("reference")?,
        })
    }

    /// Verify a completed top-up payment.
    ///
    /// `POST /api/shop/wallet/verify-topup` with `{"reference": "..."}`
    pub async fn verify_top_up(&self, reference: &str) -> Result<VerifiedTopUp, Error> {
        debug!(reference, "verifying top-up");
        self.call_with(
            Endpoint::WalletVerifyTopUp,
            &json!({ "reference": reference }),
        )
        .await?
        .data()
    }
}
