//! CLI configuration, a thin wrapper around `besthub_config`.
//!
//! Re-exports the shared types and layers `GlobalOpts` flag overrides
//! (--api-url, --insecure, --timeout) on top of the profile.

use std::time::Duration;

use besthub_core::{ClientConfig, DEFAULT_BASE_URL, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use besthub_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config, session_path,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the `ClientConfig` for this invocation.
///
/// Flag overrides take priority over profile values. Without a matching
/// profile the flags (or the built-in backend URL) are used on their own,
/// with the session still kept under the profile name.
pub fn resolve_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut client = match cfg.profiles.get(&profile_name) {
        Some(profile) => besthub_config::profile_to_client_config(profile, &profile_name)?,
        None => {
            if global.profile.is_some() {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: available_profiles(&cfg),
                });
            }
            ClientConfig {
                session_file: Some(session_path(&profile_name)),
                ..ClientConfig::with_base_url(parse_url(DEFAULT_BASE_URL)?)
            }
        }
    };

    if let Some(url) = global.api_url.as_deref() {
        client.base_url = parse_url(url)?;
    }
    if global.insecure {
        client.tls = TlsVerification::DangerAcceptInvalid;
    }
    // The flag's default only applies when the profile leaves it unset.
    let profile_timeout = cfg.profiles.get(&profile_name).and_then(|p| p.timeout);
    if profile_timeout.is_none() || global.timeout != cfg.defaults.timeout {
        client.timeout = Duration::from_secs(global.timeout);
    }
    Ok(client)
}

/// Comma-separated profile names, sorted, for diagnostics.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "api-url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}
