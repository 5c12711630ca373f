use thiserror::Error;

/// Top-level error type for the `besthub-api` crate.
///
/// Covers every way a backend call can fail: transport, HTTP status,
/// business-rule rejection carried in the `{success:false}` envelope,
/// and session expiry. `besthub-core` maps these into the error kinds
/// surfaced by its state containers.
#[derive(Debug, Error)]
pub enum Error {
    // ── Session ─────────────────────────────────────────────────────
    /// The session cookie (or legacy bearer token) is missing, expired,
    /// or revoked. Re-authentication resolves it.
    #[error("Session expired: {message}")]
    AuthExpired { message: String },

    /// Authenticated, but the account lacks the role for this endpoint.
    #[error("Access denied: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-2xx response. `message` comes from the envelope when the body
    /// parses, otherwise from a truncated body preview.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose envelope carried `success: false`.
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the session is gone and logging in again
    /// might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired { .. })
    }

    /// Returns `true` if this is a transient error worth retrying by hand.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::AuthExpired { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_expired_is_detected_structurally() {
        let err = Error::AuthExpired {
            message: "jwt malformed".into(),
        };
        assert!(err.is_auth_expired());
        assert!(!err.is_transient());

        // A rejection whose text happens to mention tokens is still a rejection.
        let err = Error::Rejected {
            message: "token expired".into(),
        };
        assert!(!err.is_auth_expired());
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::Http {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(err.is_transient());
        assert_eq!(err.status(), Some(503));

        let err = Error::Http {
            status: 404,
            message: "no wallet".into(),
        };
        assert!(!err.is_transient());
        assert!(err.is_not_found());
    }
}
