// ── Product catalogue ──

use std::sync::Arc;

use tracing::debug;

use besthub_api::ApiClient;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::{DataBundle, EntityId, Network};
use crate::stream::SliceStream;

/// Bundles on sale for the network last fetched.
pub struct Products {
    api: Arc<ApiClient>,
    bundles: Slice<Vec<DataBundle>>,
}

impl Products {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            bundles: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<Vec<DataBundle>> {
        self.bundles.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<Vec<DataBundle>> {
        self.bundles.subscribe()
    }

    pub fn clear_error(&self) {
        self.bundles.clear_error();
    }

    /// Replace the listing with `network`'s bundles. Bundles that do not
    /// name their network are attributed to the one requested.
    pub async fn fetch_by_network(
        &self,
        network: Network,
    ) -> Result<Arc<Vec<DataBundle>>, CoreError> {
        self.bundles
            .fetch_with(async {
                let raw = self.api.list_bundles(network.shop_slug()).await?;
                debug!(%network, count = raw.len(), "bundles fetched");
                Ok(raw
                    .into_iter()
                    .map(|b| {
                        let mut bundle = DataBundle::from(b);
                        bundle.network.get_or_insert(network);
                        bundle
                    })
                    .collect())
            })
            .await
    }

    /// One bundle, straight from the backend.
    pub async fn bundle(&self, id: &EntityId) -> Result<DataBundle, CoreError> {
        match self.api.get_bundle(id.as_str()).await {
            Ok(bundle) => Ok(DataBundle::from(bundle)),
            Err(err) if err.is_not_found() => Err(CoreError::not_found("bundle", id.as_str())),
            Err(err) => Err(err.into()),
        }
    }
}
