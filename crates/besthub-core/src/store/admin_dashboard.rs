// ── Admin: platform dashboard ──

use std::sync::Arc;

use besthub_api::ApiClient;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::DashboardSummary;
use crate::stream::SliceStream;

/// Platform-wide headline numbers, as computed by the backend.
pub struct AdminDashboard {
    api: Arc<ApiClient>,
    summary: Slice<Option<DashboardSummary>>,
}

impl AdminDashboard {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            summary: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<Option<DashboardSummary>> {
        self.summary.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<Option<DashboardSummary>> {
        self.summary.subscribe()
    }

    pub fn clear_error(&self) {
        self.summary.clear_error();
    }

    pub async fn fetch(&self) -> Result<DashboardSummary, CoreError> {
        let summary = self
            .summary
            .fetch_with(async {
                let raw = self.api.dashboard().await?;
                Ok(Some(DashboardSummary::from(raw)))
            })
            .await?;
        Ok(summary.as_ref().clone().unwrap_or_default())
    }
}
