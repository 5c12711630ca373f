// ── Admin: users ──

use std::sync::Arc;

use tracing::info;

use besthub_api::ApiClient;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::{EntityId, Identified, Role, User, UserStatus};
use crate::stream::SliceStream;

pub struct AdminUsers {
    api: Arc<ApiClient>,
    users: Slice<Vec<User>>,
}

impl AdminUsers {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            users: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<Vec<User>> {
        self.users.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<Vec<User>> {
        self.users.subscribe()
    }

    pub fn clear_error(&self) {
        self.users.clear_error();
    }

    pub async fn fetch_all(&self) -> Result<Arc<Vec<User>>, CoreError> {
        self.users
            .fetch_with(async {
                let raw = self.api.list_users().await?;
                Ok(raw.into_iter().map(User::from).collect())
            })
            .await
    }

    /// Change a user's role. The local row is patched and marked
    /// provisional until the next fetch.
    pub async fn update_role(&self, user_id: &EntityId, role: Role) -> Result<(), CoreError> {
        let role_name = role.to_string();
        self.users
            .update_with(
                async {
                    self.api
                        .set_user_role(user_id.as_str(), &role_name)
                        .await
                        .map_err(CoreError::from)
                },
                |users, provisional, _| {
                    if let Some(user) = users.iter_mut().find(|u| u.id() == user_id) {
                        user.role = role;
                        provisional.insert(user_id.clone());
                    }
                },
            )
            .await?;
        info!(%user_id, %role, "user role updated");
        Ok(())
    }

    pub async fn update_status(
        &self,
        user_id: &EntityId,
        status: UserStatus,
    ) -> Result<(), CoreError> {
        let status_name = status.to_string();
        self.users
            .update_with(
                async {
                    self.api
                        .set_user_status(user_id.as_str(), &status_name)
                        .await
                        .map_err(CoreError::from)
                },
                |users, provisional, _| {
                    if let Some(user) = users.iter_mut().find(|u| u.id() == user_id) {
                        user.status = status;
                        provisional.insert(user_id.clone());
                    }
                },
            )
            .await?;
        info!(%user_id, %status, "user status updated");
        Ok(())
    }

    /// Delete an account. Administrators and the acting user's own account
    /// are refused before any request is made, as is a user that is not
    /// in the loaded list.
    pub async fn delete_user(&self, user_id: &EntityId, acting: &User) -> Result<(), CoreError> {
        if let Err(err) = self.check_deletable(user_id, acting) {
            self.users.record_error(&err);
            return Err(err);
        }
        self.users
            .update_with(
                async {
                    self.api
                        .delete_user(user_id.as_str())
                        .await
                        .map_err(CoreError::from)
                },
                |users, provisional, _| {
                    users.retain(|u| u.id() != user_id);
                    provisional.remove(user_id);
                },
            )
            .await?;
        info!(%user_id, "user deleted");
        Ok(())
    }

    fn check_deletable(&self, user_id: &EntityId, acting: &User) -> Result<(), CoreError> {
        if !acting.is_admin() {
            return Err(CoreError::Forbidden {
                message: "only administrators can delete users".into(),
            });
        }
        if &acting.id == user_id {
            return Err(CoreError::validation("user", "you cannot delete your own account"));
        }
        let users = self.users.data();
        let target = users
            .iter()
            .find(|u| u.id() == user_id)
            .ok_or_else(|| CoreError::not_found("user", user_id.as_str()))?;
        if target.is_admin() {
            return Err(CoreError::validation(
                "user",
                "administrator accounts cannot be deleted",
            ));
        }
        Ok(())
    }
}
