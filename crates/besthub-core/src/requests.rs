// ── Typed request structs ──
//
// Inputs to container operations. Each validates itself before any
// network call is made.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use besthub_api::models::OrderBody;

use crate::error::CoreError;
use crate::model::{EntityId, Money, Network, Role};

// ── Auth ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password: SecretString,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("userName", &self.user_name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)?;
        if !self.email.contains('@') {
            return Err(CoreError::validation("email", "must be an email address"));
        }
        if self.password.expose_secret().is_empty() {
            return Err(CoreError::validation("password", "is required"));
        }
        if !self.role.is_self_service() {
            return Err(CoreError::validation(
                "role",
                "admin accounts cannot be self-registered",
            ));
        }
        Ok(())
    }
}

// ── Purchases ──────────────────────────────────────────────────────

/// One bundle for one recipient, paid from the wallet or by card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRequest {
    pub bundle_id: EntityId,
    pub package_name: String,
    pub network: Network,
    pub recipient: String,
    pub amount: Money,
    pub user_id: EntityId,
    /// Needed by the card gateway; ignored for wallet orders.
    pub email: Option<String>,
}

impl PurchaseRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("packageId", self.bundle_id.as_str())?;
        require("phoneNumber", &self.recipient)?;
        require("userId", self.user_id.as_str())?;
        if !self.amount.is_positive() {
            return Err(CoreError::validation("amount", "must be greater than zero"));
        }
        Ok(())
    }

    /// Wire body. Order amounts travel in major units.
    pub(crate) fn to_body(&self) -> OrderBody {
        OrderBody {
            package_id: self.bundle_id.to_string(),
            package_name: self.package_name.clone(),
            phone_number: self.recipient.trim().to_owned(),
            user_id: self.user_id.to_string(),
            network: self.network.shop_slug().to_owned(),
            amount: self.amount.to_major_json(),
            email: self.email.clone(),
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::validation(field, "is required"))
    } else {
        Ok(())
    }
}
