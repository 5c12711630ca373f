//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use besthub_core::{
    DataBundle, EntityId, Money, Network, OrderStatus, Role, Store, TransactionKind,
    TransactionStatus, User, UserStatus, view::TransactionFilter,
};

use crate::cli::{
    NetworkArg, OrderStatusArg, RoleArg, TransactionFilterArgs, TransactionKindArg,
    TransactionStatusArg, UserStatusArg,
};
use crate::error::CliError;

// ── Arg → domain conversions ────────────────────────────────────────

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mtn => Self::Mtn,
            NetworkArg::Telecel => Self::Telecel,
            NetworkArg::Airteltigo => Self::AirtelTigo,
        }
    }
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Customer => Self::Customer,
            RoleArg::Agent => Self::Agent,
            RoleArg::Wholesaler => Self::Wholesaler,
            RoleArg::Admin => Self::Admin,
        }
    }
}

impl From<UserStatusArg> for UserStatus {
    fn from(arg: UserStatusArg) -> Self {
        match arg {
            UserStatusArg::Active => Self::Active,
            UserStatusArg::Pending => Self::Pending,
            UserStatusArg::Suspended => Self::Suspended,
        }
    }
}

impl From<OrderStatusArg> for OrderStatus {
    fn from(arg: OrderStatusArg) -> Self {
        match arg {
            OrderStatusArg::Pending => Self::Pending,
            OrderStatusArg::Processing => Self::Processing,
            OrderStatusArg::Completed => Self::Completed,
            OrderStatusArg::Failed => Self::Failed,
        }
    }
}

impl From<TransactionKindArg> for TransactionKind {
    fn from(arg: TransactionKindArg) -> Self {
        match arg {
            TransactionKindArg::Topup => Self::TopUp,
            TransactionKindArg::Purchase => Self::Purchase,
            TransactionKindArg::Refund => Self::Refund,
            TransactionKindArg::Withdrawal => Self::Withdrawal,
            TransactionKindArg::Adjustment => Self::Adjustment,
        }
    }
}

impl From<TransactionStatusArg> for TransactionStatus {
    fn from(arg: TransactionStatusArg) -> Self {
        match arg {
            TransactionStatusArg::Pending => Self::Pending,
            TransactionStatusArg::Completed => Self::Completed,
            TransactionStatusArg::Failed => Self::Failed,
        }
    }
}

impl From<TransactionFilterArgs> for TransactionFilter {
    fn from(args: TransactionFilterArgs) -> Self {
        Self {
            kind: args.kind.map(Into::into),
            status: args.status.map(Into::into),
            search: args.search.unwrap_or_default(),
        }
    }
}

// ── Input parsing ───────────────────────────────────────────────────

/// Parse a cedi amount typed on the command line.
pub fn parse_money(field: &str, raw: &str) -> Result<Money, CliError> {
    raw.parse::<Money>().map_err(|e| CliError::Validation {
        field: field.into(),
        reason: e.to_string(),
    })
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Find a bundle by id or by exact (case-insensitive) package name.
pub fn resolve_bundle(bundles: &[DataBundle], needle: &str) -> Result<DataBundle, CliError> {
    bundles
        .iter()
        .find(|b| b.id.as_str() == needle)
        .or_else(|| {
            bundles
                .iter()
                .find(|b| b.package_name.eq_ignore_ascii_case(needle.trim()))
        })
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "bundle".into(),
            identifier: needle.into(),
            list_command: "bundles list --network <network>".into(),
        })
}

// ── Session ─────────────────────────────────────────────────────────

/// The signed-in user, or a session-expired error.
pub async fn current_user(store: &Store) -> Result<User, CliError> {
    Ok(store.require_role(Role::Customer).await?)
}

/// The signed-in admin.
pub async fn require_admin(store: &Store) -> Result<User, CliError> {
    Ok(store.require_role(Role::Admin).await?)
}

// ── Interactive ─────────────────────────────────────────────────────

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Display ─────────────────────────────────────────────────────────

pub fn opt(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_owned()
}

pub fn date(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

pub fn network(network: Option<Network>) -> String {
    network.map_or_else(|| "-".into(), |n| n.label().to_owned())
}

pub fn id_list(ids: &[String]) -> Vec<EntityId> {
    ids.iter().map(|id| EntityId::from(id.as_str())).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bundle(id: &str, name: &str) -> DataBundle {
        DataBundle {
            id: EntityId::from(id),
            network: Some(Network::Mtn),
            package_name: name.into(),
            data_amount: None,
            price: Money::from_major(5),
            original_price: None,
            validity: None,
            category: besthub_core::BundleCategory::default(),
            description: None,
        }
    }

    #[test]
    fn bundles_resolve_by_id_then_name() {
        let list = [bundle("b1", "MTN 1GB"), bundle("b2", "MTN 2GB")];
        assert_eq!(resolve_bundle(&list, "b2").unwrap().package_name, "MTN 2GB");
        assert_eq!(resolve_bundle(&list, "mtn 1gb").unwrap().id.as_str(), "b1");
        assert!(matches!(
            resolve_bundle(&list, "MTN 5GB"),
            Err(CliError::NotFound { .. })
        ));
    }

    #[test]
    fn money_input_accepts_cedi_prefixes() {
        assert_eq!(parse_money("amount", "GHS 12.50").unwrap(), Money::from_minor(1250));
        assert!(matches!(
            parse_money("amount", "12.345"),
            Err(CliError::Validation { .. })
        ));
    }
}
