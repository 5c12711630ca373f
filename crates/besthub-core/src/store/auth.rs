// ── Auth container ──

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

use besthub_api::ApiClient;
use besthub_api::models::RegisterBody;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::User;
use crate::requests::RegisterRequest;
use crate::session::SessionStore;
use crate::stream::SliceStream;

/// The signed-in user, if any.
pub struct Auth {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    user: Slice<Option<User>>,
}

impl Auth {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            user: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<Option<User>> {
        self.user.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<Option<User>> {
        self.user.subscribe()
    }

    pub fn clear_error(&self) {
        self.user.clear_error();
    }

    /// The user from the last login or session check.
    pub fn current_user(&self) -> Option<User> {
        self.user.data().as_ref().clone()
    }

    /// Create an account. Does not sign in; the backend returns the new
    /// user when it echoes one.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<User>, CoreError> {
        if let Err(err) = request.validate() {
            self.user.record_error(&err);
            return Err(err);
        }
        let role = request.role.to_string();
        let body = RegisterBody {
            user_name: request.user_name.trim(),
            email: request.email.trim(),
            phone: request.phone.trim(),
            role: &role,
            password: request.password.expose_secret(),
        };
        let outcome = self
            .user
            .update_with(
                async { self.api.register(&body).await.map_err(CoreError::from) },
                |_, _, _| {},
            )
            .await?;
        info!(email = body.email, "account registered");
        Ok(outcome.user.map(User::from))
    }

    /// Sign in and keep the session cookie for later commands.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, CoreError> {
        if email.trim().is_empty() || password.expose_secret().is_empty() {
            let err = CoreError::validation("credentials", "email and password are required");
            self.user.record_error(&err);
            return Err(err);
        }
        let request = async {
            let outcome = self.api.login(email.trim(), password).await?;
            let user = match outcome.user {
                Some(user) => User::from(user),
                // Some deployments only set the cookie; ask who we are.
                None => self
                    .api
                    .check_auth()
                    .await?
                    .map(User::from)
                    .ok_or_else(|| CoreError::Rejected {
                        message: outcome
                            .message
                            .unwrap_or_else(|| "login returned no user".into()),
                    })?,
            };
            Ok::<_, CoreError>(user)
        };
        let user = self
            .user
            .fetch_with(async { request.await.map(Some) })
            .await?;
        if let Some(cookie) = self.api.cookie_header() {
            self.session.set_cookie(cookie);
        }
        let user = user.as_ref().clone().ok_or_else(|| {
            CoreError::Internal("login succeeded but no user was recorded".into())
        })?;
        info!(email = %user.email, role = %user.role, "signed in");
        Ok(user)
    }

    /// End the session. Local state is cleared even when the backend
    /// call fails; an expired session counts as logged out.
    pub async fn logout(&self) -> Result<(), CoreError> {
        let result = self.api.logout().await;
        self.clear();
        match result {
            Ok(()) => {
                info!("signed out");
                Ok(())
            }
            Err(err) if err.is_auth_expired() => Ok(()),
            Err(err) => {
                warn!(error = %err, "logout request failed; local session cleared anyway");
                Err(err.into())
            }
        }
    }

    /// Ask the backend who the session belongs to. A missing or expired
    /// session yields `None` rather than an error.
    pub async fn check_auth(&self) -> Result<Option<User>, CoreError> {
        let ticket = self.user.begin_fetch();
        match self.api.check_auth().await {
            Ok(user) => {
                let user = user.map(User::from);
                ticket.succeed(user.clone());
                Ok(user)
            }
            Err(err) if err.is_auth_expired() => {
                ticket.succeed(None);
                Ok(None)
            }
            Err(err) => {
                let err = CoreError::from(err);
                ticket.fail(&err);
                Err(err)
            }
        }
    }

    /// Forget the user and the persisted session without calling the backend.
    pub fn clear(&self) {
        self.user.reset(None);
        self.session.clear();
        self.api.clear_bearer_token();
    }
}
