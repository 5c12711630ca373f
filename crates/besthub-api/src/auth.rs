// Auth endpoints
//
// Login sets the HTTP-only session cookie; the jar carries it from then on.
// These endpoints return the user beside `data` (`{success, user, message}`),
// so lookups go through `Envelope::field`.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::models::{ApiUser, RegisterBody};

/// What `register` and `login` hand back.
#[derive(Debug, Clone, Default)]
pub struct AuthOutcome {
    pub user: Option<ApiUser>,
    pub message: Option<String>,
}

impl ApiClient {
    /// Create an account.
    ///
    /// `POST /api/auth/register`
    pub async fn register(&self, body: &RegisterBody<'_>) -> Result<AuthOutcome, Error> {
        debug!(email = body.email, role = body.role, "registering account");
        let env = self.call_with(Endpoint::Register, body).await?;
        Ok(AuthOutcome {
            user: env.field("user")?,
            message: env.message,
        })
    }

    /// Log in with email and password.
    ///
    /// `POST /api/auth/login` with `{"email": "...", "password": "..."}`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<AuthOutcome, Error> {
        debug!(email, "logging in");
        let env = self
            .call_with(
                Endpoint::Login,
                &json!({
                    "email": email,
                    "password": password.expose_secret(),
                }),
            )
            .await?;
        Ok(AuthOutcome {
            user: env.field("user")?,
            message: env.message,
        })
    }

    /// End the session.
    ///
    /// `POST /api/auth/logout`
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        self.call_with(Endpoint::Logout, &json!({})).await?;
        self.clear_bearer_token();
        Ok(())
    }

    /// Return the user behind the current session.
    ///
    /// `GET /api/auth/check-auth`
    pub async fn check_auth(&self) -> Result<Option<ApiUser>, Error> {
        let env = self.call(Endpoint::CheckAuth).await?;
        env.field("user")
    }
}
