// ── Shopper orders ──

use std::sync::Arc;

use tracing::{info, warn};

use besthub_api::ApiClient;

use super::slice::{Slice, SliceState};
use super::wallet::Wallet;
use crate::error::CoreError;
use crate::model::{CheckoutSession, EntityId, Identified, Order};
use crate::requests::PurchaseRequest;
use crate::session::SessionStore;
use crate::stream::SliceStream;

pub struct ShopOrders {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    wallet: Arc<Wallet>,
    orders: Slice<Vec<Order>>,
}

impl ShopOrders {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>, wallet: Arc<Wallet>) -> Self {
        Self {
            api,
            session,
            wallet,
            orders: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<Vec<Order>> {
        self.orders.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<Vec<Order>> {
        self.orders.subscribe()
    }

    pub fn clear_error(&self) {
        self.orders.clear_error();
    }

    pub async fn fetch_for_user(&self, user_id: &EntityId) -> Result<Arc<Vec<Order>>, CoreError> {
        self.orders
            .fetch_with(async {
                let raw = self.api.list_user_orders(user_id.as_str()).await?;
                Ok(raw.into_iter().map(Order::from).collect())
            })
            .await
    }

    pub async fn details(&self, order_id: &EntityId) -> Result<Order, CoreError> {
        match self.api.get_order(order_id.as_str()).await {
            Ok(order) => Ok(Order::from(order)),
            Err(err) if err.is_not_found() => Err(CoreError::not_found("order", order_id.as_str())),
            Err(err) => Err(err.into()),
        }
    }

    /// Pay for a bundle from the wallet. The new order is added to the
    /// list and the wallet balance is re-read from the backend.
    pub async fn purchase(&self, request: &PurchaseRequest) -> Result<Option<Order>, CoreError> {
        self.validate(request)?;
        let body = request.to_body();
        let order = self
            .orders
            .update_with(
                async {
                    self.api
                        .place_order(&body)
                        .await
                        .map(|o| o.map(Order::from))
                        .map_err(CoreError::from)
                },
                |orders, _, placed: &Option<Order>| {
                    if let Some(order) = placed {
                        upsert_front(orders, order.clone());
                    }
                },
            )
            .await?;
        info!(
            network = %request.network,
            recipient = %request.recipient,
            amount = %request.amount,
            "wallet purchase placed"
        );

        if let Err(err) = self.wallet.fetch_balance(&request.user_id).await {
            warn!(error = %err, "purchase succeeded but the balance refresh failed");
        }
        Ok(order)
    }

    /// Start a card payment. The backend creates the order and returns the
    /// gateway URL; the order id is kept in the session so the payment
    /// redirect can be matched back to it.
    pub async fn create_card_order(
        &self,
        request: &PurchaseRequest,
    ) -> Result<CheckoutSession, CoreError> {
        self.validate(request)?;
        if request.email.as_deref().is_none_or(|e| e.trim().is_empty()) {
            let err = CoreError::validation("email", "is required for card payments");
            self.orders.record_error(&err);
            return Err(err);
        }
        let body = request.to_body();
        let checkout = self
            .orders
            .update_with(
                async { self.api.create_order(&body).await.map_err(CoreError::from) },
                |_, _, _| {},
            )
            .await?;

        let order_id = checkout.order_id.filter(|id| !id.is_empty()).map(EntityId::from);
        match &order_id {
            Some(id) => self.session.set_current_order(id.clone()),
            None => warn!("card order created without an order id; capture will need one"),
        }
        info!(order_id = ?order_id, "card checkout started");
        Ok(CheckoutSession {
            authorization_url: checkout.authorization_url,
            order_id,
        })
    }

    /// Confirm the card payment for the order started by
    /// `create_card_order`. The stored order id is cleared on success.
    pub async fn capture_payment(&self, reference: &str) -> Result<Option<Order>, CoreError> {
        let invalid = if reference.trim().is_empty() {
            Some(CoreError::validation("reference", "is required"))
        } else if self.session.current_order().is_none() {
            Some(CoreError::validation(
                "orderId",
                "no card payment is in progress",
            ))
        } else {
            None
        };
        if let Some(err) = invalid {
            self.orders.record_error(&err);
            return Err(err);
        }
        let order_id = self.session.current_order().unwrap_or_default();

        let captured = self
            .orders
            .update_with(
                async {
                    self.api
                        .capture_payment(reference.trim(), order_id.as_str())
                        .await
                        .map(|o| o.map(Order::from))
                        .map_err(CoreError::from)
                },
                |orders, _, captured: &Option<Order>| {
                    if let Some(order) = captured {
                        upsert_front(orders, order.clone());
                    }
                },
            )
            .await?;
        self.session.take_current_order();
        info!(%order_id, "card payment captured");
        Ok(captured)
    }

    fn validate(&self, request: &PurchaseRequest) -> Result<(), CoreError> {
        request.validate().inspect_err(|err| self.orders.record_error(err))
    }
}

/// Replace the order with the same id, or put it first.
fn upsert_front(orders: &mut Vec<Order>, order: Order) {
    if let Some(existing) = orders.iter_mut().find(|o| o.id() == order.id()) {
        *existing = order;
    } else {
        orders.insert(0, order);
    }
}
