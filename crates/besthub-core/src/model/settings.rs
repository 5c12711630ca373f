// ── Platform settings ──

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::network::Network;
use crate::error::CoreError;

/// Admin-editable platform switches and limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub mtn_available: bool,
    pub telecel_available: bool,
    pub airteltigo_available: bool,
    pub maintenance_mode: bool,
    pub new_registrations: bool,
    pub auto_approve_agents: bool,
    pub email_notifications: bool,
    pub low_balance_alerts: bool,
    pub system_alerts: bool,
    /// Percent, 0 to 100.
    pub agent_commission: f64,
    /// Percent, 0 to 100.
    pub wholesaler_commission: f64,
    pub min_topup_amount: Money,
    pub max_topup_amount: Money,
    pub daily_user_limit: Money,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            mtn_available: true,
            telecel_available: true,
            airteltigo_available: true,
            maintenance_mode: false,
            new_registrations: true,
            auto_approve_agents: false,
            email_notifications: true,
            low_balance_alerts: true,
            system_alerts: true,
            agent_commission: 10.0,
            wholesaler_commission: 15.0,
            min_topup_amount: Money::from_major(5),
            max_topup_amount: Money::from_major(5000),
            daily_user_limit: Money::from_major(1000),
        }
    }
}

impl SystemSettings {
    pub fn is_available(&self, network: Network) -> bool {
        match network {
            Network::Mtn => self.mtn_available,
            Network::Telecel => self.telecel_available,
            Network::AirtelTigo => self.airteltigo_available,
        }
    }

    pub fn set_available(&mut self, network: Network, available: bool) {
        match network {
            Network::Mtn => self.mtn_available = available,
            Network::Telecel => self.telecel_available = available,
            Network::AirtelTigo => self.airteltigo_available = available,
        }
    }

    /// Checks the limits before they are sent to the backend.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("agentCommission", self.agent_commission),
            ("wholesalerCommission", self.wholesaler_commission),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(CoreError::validation(
                    field,
                    format!("must be between 0 and 100, got {value}"),
                ));
            }
        }
        if self.min_topup_amount.is_negative() {
            return Err(CoreError::validation(
                "minTopupAmount",
                "must not be negative",
            ));
        }
        if self.min_topup_amount > self.max_topup_amount {
            return Err(CoreError::validation(
                "maxTopupAmount",
                format!(
                    "must be at least the minimum top-up ({})",
                    self.min_topup_amount
                ),
            ));
        }
        if self.daily_user_limit.is_negative() {
            return Err(CoreError::validation(
                "dailyUserLimit",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SystemSettings::default().validate().is_ok());
    }

    #[test]
    fn min_above_max_is_rejected() {
        let settings = SystemSettings {
            min_topup_amount: Money::from_major(100),
            max_topup_amount: Money::from_major(50),
            ..SystemSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "maxTopupAmount"));
    }

    #[test]
    fn commission_out_of_range_is_rejected() {
        let settings = SystemSettings {
            wholesaler_commission: 120.0,
            ..SystemSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn availability_toggles_per_network() {
        let mut settings = SystemSettings::default();
        settings.set_available(Network::AirtelTigo, false);
        assert!(!settings.is_available(Network::AirtelTigo));
        assert!(settings.is_available(Network::Mtn));
    }
}
