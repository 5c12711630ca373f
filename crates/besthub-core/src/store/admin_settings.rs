// ── Admin: platform settings ──

use std::sync::Arc;

use tracing::info;

use besthub_api::ApiClient;
use besthub_api::models::ApiSettings;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::SystemSettings;
use crate::stream::SliceStream;

pub struct AdminSettings {
    api: Arc<ApiClient>,
    settings: Slice<SystemSettings>,
}

impl AdminSettings {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            settings: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<SystemSettings> {
        self.settings.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<SystemSettings> {
        self.settings.subscribe()
    }

    pub fn clear_error(&self) {
        self.settings.clear_error();
    }

    pub async fn fetch(&self) -> Result<SystemSettings, CoreError> {
        let settings = self
            .settings
            .fetch_with(async { Ok(SystemSettings::from(self.api.settings().await?)) })
            .await?;
        Ok(settings.as_ref().clone())
    }

    /// Validate and store `settings`. What the backend echoes back wins;
    /// without an echo the submitted values are kept.
    pub async fn save(&self, settings: SystemSettings) -> Result<SystemSettings, CoreError> {
        if let Err(err) = settings.validate() {
            self.settings.record_error(&err);
            return Err(err);
        }
        let wire = ApiSettings::from(&settings);
        let stored = self
            .settings
            .update_with(
                async {
                    let echoed = self.api.update_settings(&wire).await?;
                    Ok::<_, CoreError>(echoed.map_or(settings, SystemSettings::from))
                },
                |current, _, stored: &SystemSettings| *current = stored.clone(),
            )
            .await?;
        info!(maintenance = stored.maintenance_mode, "platform settings saved");
        Ok(stored)
    }
}
