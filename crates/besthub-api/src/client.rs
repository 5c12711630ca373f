// Backend HTTP client
//
// Wraps `reqwest::Client` with URL construction under `{base}/api`,
// session cookie handling, and envelope normalisation. Endpoint methods
// live in `auth.rs`, `shop.rs` and `admin.rs` as inherent impls so this
// module stays focused on transport mechanics.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::StatusCode;
use reqwest::cookie::{CookieStore, Jar};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint::Endpoint;
use crate::envelope::Envelope;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Besthub backend.
///
/// Every call returns a normalised [`Envelope`] or an [`Error`]; callers
/// never see a 2xx response that the backend flagged as unsuccessful.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Legacy bearer token, attached only when configured. The HTTP-only
    /// session cookie in the jar is the primary credential.
    bearer: RwLock<Option<SecretString>>,
    cookie_jar: Option<Arc<Jar>>,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// A cookie jar is added when the config has none, since the session
    /// lives in a cookie. `base_url` is the backend root
    /// (e.g. `http://localhost:4400`); `/api` is appended per request.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            bearer: RwLock::new(None),
            cookie_jar,
            timeout_secs: config.timeout_secs(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            bearer: RwLock::new(None),
            cookie_jar: None,
            timeout_secs: 0,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns the `Cookie` header value the jar would send, if any.
    pub fn cookie_header(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    /// Seed the jar from a previously captured `Cookie` header value, so a
    /// session survives across processes. No-op without a jar.
    pub fn restore_cookies(&self, header: &str) {
        let Some(jar) = self.cookie_jar.as_ref() else {
            return;
        };
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            jar.add_cookie_str(pair, &self.base_url);
        }
        trace!("session cookies restored");
    }

    // ── Legacy bearer token ──────────────────────────────────────────

    /// Attach a bearer token to every subsequent request.
    pub fn set_bearer_token(&self, token: SecretString) {
        debug!("bearer token configured");
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Stop sending the bearer token.
    pub fn clear_bearer_token(&self) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn apply_bearer(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.bearer.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build the full URL for an endpoint: `{base}/api/{namespace}/{segments..}`.
    ///
    /// Segments are percent-encoded, so ids containing `/` or spaces cannot
    /// escape their position in the path.
    pub fn url_for(&self, endpoint: &Endpoint<'_>) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments
                .pop_if_empty()
                .push("api")
                .push(endpoint.namespace().as_str())
                .extend(endpoint.segments());
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Call an endpoint without a body.
    pub async fn call(&self, endpoint: Endpoint<'_>) -> Result<Envelope, Error> {
        let url = self.url_for(&endpoint)?;
        debug!("{} {}", endpoint.method(), url);
        let builder = self.apply_bearer(self.http.request(endpoint.method(), url));
        self.send(builder).await
    }

    /// Call an endpoint with a JSON body.
    pub async fn call_with<B>(&self, endpoint: Endpoint<'_>, body: &B) -> Result<Envelope, Error>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = self.url_for(&endpoint)?;
        debug!("{} {}", endpoint.method(), url);
        let builder = self.apply_bearer(self.http.request(endpoint.method(), url).json(body));
        self.send(builder).await
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Envelope, Error> {
        let resp = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                Error::Transport(e)
            }
        })?;
        parse_envelope(resp).await
    }
}

/// Normalise a response into an [`Envelope`] or the error it represents.
///
/// - 401 / 419 become [`Error::AuthExpired`]
/// - 403 becomes [`Error::Forbidden`]
/// - any other non-2xx becomes [`Error::Http`], with the envelope's message
///   when the body parses
/// - a 2xx envelope with `success: false` becomes [`Error::Rejected`]
async fn parse_envelope(resp: reqwest::Response) -> Result<Envelope, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;
    trace!(status = status.as_u16(), len = body.len(), "response received");

    if !status.is_success() {
        let message = serde_json::from_str::<Envelope>(&body)
            .ok()
            .and_then(|env| env.message)
            .unwrap_or_else(|| preview(&body));

        return Err(match status {
            StatusCode::UNAUTHORIZED => Error::AuthExpired { message },
            s if s.as_u16() == 419 => Error::AuthExpired { message },
            StatusCode::FORBIDDEN => Error::Forbidden { message },
            _ => Error::Http {
                status: status.as_u16(),
                message,
            },
        });
    }

    if body.trim().is_empty() {
        return Ok(Envelope::default());
    }

    let envelope: Envelope = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body: body.clone(),
    })?;

    envelope.into_result()
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
