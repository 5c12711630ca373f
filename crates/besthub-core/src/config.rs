// ── Runtime connection configuration ──
//
// Describes *how* to reach the Besthub backend. Carries connection tuning
// and the optional legacy token, but never touches disk. The CLI builds a
// `ClientConfig` from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use besthub_api::{TlsMode, TransportConfig};

/// Default backend root; the API lives under `{base}/api`.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4400";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed staging servers).
    DangerAcceptInvalid,
}

/// Configuration for one backend connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Request timeout. Zero leaves it to the HTTP runtime.
    pub timeout: Duration,
    /// Legacy bearer token, sent alongside the session cookie when set.
    pub token: Option<SecretString>,
    /// Where the session (cookie, pending order id) is persisted.
    /// `None` keeps it in memory for this process only.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default base URL is a valid URL")),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            token: None,
            session_file: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Transport settings for `besthub_api::ApiClient::new`.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            ..TransportConfig::default()
        }
        .with_cookie_jar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:4400/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.session_file.is_none());
    }

    #[test]
    fn transport_carries_tls_mode_and_jar() {
        let config = ClientConfig {
            tls: TlsVerification::DangerAcceptInvalid,
            ..ClientConfig::default()
        };
        let transport = config.transport();
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert!(transport.cookie_jar.is_some());
    }
}
