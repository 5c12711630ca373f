// ── Core error types ──
//
// User-facing errors from besthub-core. Views never match on HTTP details;
// the `From<besthub_api::Error>` impl folds transport failures into the
// small taxonomy the containers surface (`ErrorKind`).

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the Besthub API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Session errors ───────────────────────────────────────────────
    #[error("Session expired: {message}")]
    SessionExpired { message: String },

    #[error("Access denied: {message}")]
    Forbidden { message: String },

    // ── Backend errors ───────────────────────────────────────────────
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Rejected by the backend: {message}")]
    Rejected { message: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Local errors ─────────────────────────────────────────────────
    /// Input refused before any network call was made.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// The error classes a container records alongside its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failure: refused, DNS, TLS, timeout.
    Network,
    /// Non-success HTTP status.
    Http,
    /// The backend answered `success: false`.
    Rejected,
    /// Caught locally before a request was sent.
    Validation,
    /// The session is gone; log in again.
    AuthExpired,
}

impl CoreError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            identifier: identifier.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => ErrorKind::Network,
            Self::SessionExpired { .. } => ErrorKind::AuthExpired,
            Self::Forbidden { .. } | Self::Http { .. } | Self::NotFound { .. } => ErrorKind::Http,
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Validation { .. } | Self::Config { .. } => ErrorKind::Validation,
            Self::Internal(_) => ErrorKind::Rejected,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<besthub_api::Error> for CoreError {
    fn from(err: besthub_api::Error) -> Self {
        use besthub_api::Error as Api;

        match err {
            Api::AuthExpired { message } => CoreError::SessionExpired { message },
            Api::Forbidden { message } => CoreError::Forbidden { message },
            Api::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if let Some(status) = e.status() {
                    CoreError::Http {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            Api::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            Api::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            Api::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            Api::Http { status, message } => CoreError::Http { status, message },
            Api::Rejected { message } => CoreError::Rejected { message },
            Api::Deserialization { message, .. } => {
                CoreError::Internal(format!("unexpected response: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_expiry_is_structured() {
        let err = CoreError::from(besthub_api::Error::AuthExpired {
            message: "Token expired".into(),
        });
        assert_eq!(err.kind(), ErrorKind::AuthExpired);
        assert!(err.is_session_expired());
    }

    #[test]
    fn rejection_keeps_backend_message() {
        let err = CoreError::from(besthub_api::Error::Rejected {
            message: "Insufficient wallet balance".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.to_string(), "Rejected by the backend: Insufficient wallet balance");
    }

    #[test]
    fn status_errors_are_http_kind() {
        let err = CoreError::from(besthub_api::Error::Http {
            status: 502,
            message: "Bad gateway".into(),
        });
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(CoreError::validation("amount", "required").kind(), ErrorKind::Validation);
    }
}
