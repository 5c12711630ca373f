// ── Admin: per-network order queues ──

use std::sync::Arc;

use tracing::info;

use besthub_api::ApiClient;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::{EntityId, Identified, Network, Order, OrderStatus};
use crate::stream::SliceStream;
use crate::view::Selection;

/// Orders for one network, as the admin queue serves them.
pub struct AdminOrders {
    api: Arc<ApiClient>,
    network: Network,
    orders: Slice<Vec<Order>>,
}

impl AdminOrders {
    pub(crate) fn new(api: Arc<ApiClient>, network: Network) -> Self {
        Self {
            api,
            network,
            orders: Slice::default(),
        }
    }

    pub fn network(&self) -> Network {
        self.network
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

    /// The network's order queue.
    pub async fn fetch_all(&self) -> Result<Arc<Vec<Order>>, CoreError> {
        self.fetch(false).await
    }

    /// Every order for the network, through the unfiltered endpoint some
    /// deployments expose.
    pub async fn fetch_all_alternative(&self) -> Result<Arc<Vec<Order>>, CoreError> {
        self.fetch(true).await
    }

    async fn fetch(&self, everything: bool) -> Result<Arc<Vec<Order>>, CoreError> {
        let slug = self.network.admin_slug();
        let network = self.network;
        self.orders
            .fetch_with(async {
                let raw = if everything {
                    self.api.list_all_network_orders(slug).await?
                } else {
                    self.api.list_network_orders(slug).await?
                };
                Ok(raw
                    .into_iter()
                    .map(|o| {
                        let mut order = Order::from(o);
                        order.network.get_or_insert(network);
                        order
                    })
                    .collect())
            })
            .await
    }

    pub async fn update_status(
        &self,
        order_id: &EntityId,
        status: OrderStatus,
    ) -> Result<(), CoreError> {
        let status_name = status.to_string();
        self.orders
            .update_with(
                async {
                    self.api
                        .set_order_status(self.network.admin_slug(), order_id.as_str(), &status_name)
                        .await
                        .map_err(CoreError::from)
                },
                |orders, provisional, _| {
                    if let Some(order) = orders.iter_mut().find(|o| o.id() == order_id) {
                        order.status = status;
                        provisional.insert(order_id.clone());
                    }
                },
            )
            .await?;
        info!(network = %self.network, %order_id, %status, "order status updated");
        Ok(())
    }

    /// Apply `status` to every selected order in one request. On success
    /// the matching rows are patched (provisionally) and the selection is
    /// cleared; on failure nothing changes locally. Returns the backend's
    /// updated count when it reports one.
    pub async fn bulk_update_status(
        &self,
        selection: &mut Selection,
        status: OrderStatus,
    ) -> Result<Option<u64>, CoreError> {
        if selection.is_empty() {
            let err = CoreError::validation("selection", "select at least one order");
            self.orders.record_error(&err);
            return Err(err);
        }
        let ids: Vec<EntityId> = selection.iter().cloned().collect();
        let id_refs: Vec<&str> = ids.iter().map(EntityId::as_str).collect();
        let status_name = status.to_string();

        let updated = self
            .orders
            .update_with(
                async {
                    self.api
                        .set_order_status_bulk(self.network.admin_slug(), &id_refs, &status_name)
                        .await
                        .map_err(CoreError::from)
                },
                |orders, provisional, _| {
                    for order in orders.iter_mut().filter(|o| selection.contains(o.id())) {
                        order.status = status;
                        provisional.insert(order.id.clone());
                    }
                },
            )
            .await?;
        selection.clear();
        info!(
            network = %self.network,
            count = ids.len(),
            %status,
            reported = ?updated,
            "bulk order status applied"
        );
        Ok(updated)
    }
}
