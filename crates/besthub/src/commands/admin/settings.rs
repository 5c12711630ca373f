//! Platform settings.

use besthub_core::{Network, Store, SystemSettings};

use crate::cli::{AdminSettingsArgs, AdminSettingsCommand, GlobalOpts};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

const KEYS: &str = "mtn-available, telecel-available, airteltigo-available, maintenance-mode, \
    new-registrations, auto-approve-agents, email-notifications, low-balance-alerts, \
    system-alerts, agent-commission, wholesaler-commission, min-topup-amount, \
    max-topup-amount, daily-user-limit";

fn settings_detail(s: &SystemSettings) -> String {
    let on = |b: bool| if b { "on" } else { "off" }.to_owned();
    output::detail_block(&[
        ("MTN", on(s.mtn_available)),
        ("Telecel", on(s.telecel_available)),
        ("AirtelTigo", on(s.airteltigo_available)),
        ("Maintenance mode", on(s.maintenance_mode)),
        ("New registrations", on(s.new_registrations)),
        ("Auto-approve agents", on(s.auto_approve_agents)),
        ("Email notifications", on(s.email_notifications)),
        ("Low-balance alerts", on(s.low_balance_alerts)),
        ("System alerts", on(s.system_alerts)),
        ("Agent commission", format!("{}%", s.agent_commission)),
        ("Wholesaler commission", format!("{}%", s.wholesaler_commission)),
        ("Min top-up", s.min_topup_amount.to_string()),
        ("Max top-up", s.max_topup_amount.to_string()),
        ("Daily user limit", s.daily_user_limit.to_string()),
    ])
}

fn parse_switch(key: &str, value: &str) -> Result<bool, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(CliError::Validation {
            field: key.into(),
            reason: "must be on or off".into(),
        }),
    }
}

fn parse_percent(key: &str, value: &str) -> Result<f64, CliError> {
    value
        .trim_end_matches('%')
        .parse()
        .map_err(|_| CliError::Validation {
            field: key.into(),
            reason: "must be a percentage".into(),
        })
}

/// Apply one `key = value` change to `settings`.
fn apply_setting(settings: &mut SystemSettings, key: &str, value: &str) -> Result<(), CliError> {
    let key = key.replace('_', "-");
    match key.as_str() {
        "mtn-available" => settings.set_available(Network::Mtn, parse_switch(&key, value)?),
        "telecel-available" => settings.set_available(Network::Telecel, parse_switch(&key, value)?),
        "airteltigo-available" | "at-available" => {
            settings.set_available(Network::AirtelTigo, parse_switch(&key, value)?);
        }
        "maintenance-mode" => settings.maintenance_mode = parse_switch(&key, value)?,
        "new-registrations" => settings.new_registrations = parse_switch(&key, value)?,
        "auto-approve-agents" => settings.auto_approve_agents = parse_switch(&key, value)?,
        "email-notifications" => settings.email_notifications = parse_switch(&key, value)?,
        "low-balance-alerts" => settings.low_balance_alerts = parse_switch(&key, value)?,
        "system-alerts" => settings.system_alerts = parse_switch(&key, value)?,
        "agent-commission" => settings.agent_commission = parse_percent(&key, value)?,
        "wholesaler-commission" => settings.wholesaler_commission = parse_percent(&key, value)?,
        "min-topup-amount" => settings.min_topup_amount = util::parse_money(&key, value)?,
        "max-topup-amount" => settings.max_topup_amount = util::parse_money(&key, value)?,
        "daily-user-limit" => settings.daily_user_limit = util::parse_money(&key, value)?,
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown setting. Valid keys: {KEYS}"),
            });
        }
    }
    Ok(())
}

pub(super) async fn handle(
    store: &Store,
    args: AdminSettingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let container = store.admin_settings();
    let settings = match args.command {
        AdminSettingsCommand::Get => container.fetch().await?,
        AdminSettingsCommand::Set { key, value } => {
            let mut settings = container.fetch().await?;
            apply_setting(&mut settings, &key, &value)?;
            container.save(settings).await?
        }
    };
    let out = output::render_single(&global.output, &settings, settings_detail, |_| {
        "settings".into()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use besthub_core::Money;

    use super::*;

    #[test]
    fn keys_accept_either_separator() {
        let mut settings = SystemSettings::default();
        apply_setting(&mut settings, "maintenance_mode", "on").unwrap();
        apply_setting(&mut settings, "at-available", "off").unwrap();
        apply_setting(&mut settings, "min-topup-amount", "10").unwrap();
        apply_setting(&mut settings, "agent-commission", "12.5%").unwrap();
        assert!(settings.maintenance_mode);
        assert!(!settings.is_available(Network::AirtelTigo));
        assert_eq!(settings.min_topup_amount, Money::from_major(10));
        assert!((settings.agent_commission - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_key_and_bad_switch_are_rejected() {
        let mut settings = SystemSettings::default();
        assert!(apply_setting(&mut settings, "dark-mode", "on").is_err());
        assert!(apply_setting(&mut settings, "system-alerts", "maybe").is_err());
    }
}
