//! Auth command handlers: login, logout, register, whoami.

use dialoguer::Input;
use secrecy::SecretString;

use besthub_core::{RegisterRequest, Store, User};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

pub(crate) fn user_detail(u: &User) -> String {
    output::detail_block(&[
        ("ID", u.id.to_string()),
        ("Name", u.user_name.clone()),
        ("Email", u.email.clone()),
        ("Phone", util::opt(u.phone.as_deref())),
        ("Role", u.role.to_string()),
        ("Status", u.status.to_string()),
        (
            "Balance",
            u.wallet_balance
                .map_or_else(|| "-".into(), |b| b.to_string()),
        ),
        ("Joined", util::date(u.created_at)),
    ])
}

/// Email from the flag, the profile, or a prompt.
fn resolve_email(flag: Option<String>, profile: Option<&config::Profile>) -> Result<String, CliError> {
    if let Some(email) = flag.or_else(|| profile.and_then(|p| p.email.clone())) {
        return Ok(email);
    }
    Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(util::prompt_err)
}

/// Password from the profile's env var, keyring or file; prompted otherwise.
fn resolve_password(
    profile: Option<&config::Profile>,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    if let Some(profile) = profile {
        if let Ok(secret) = besthub_config::resolve_password(profile, profile_name) {
            return Ok(secret);
        }
    }
    let pass = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
    Ok(SecretString::from(pass))
}

pub async fn handle(store: &Store, args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login { email } => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.get(&profile_name);

            let email = resolve_email(email, profile)?;
            let password = resolve_password(profile, &profile_name)?;

            let spinner = output::spinner(global, "Signing in...");
            let user = store.auth().login(&email, &password).await;
            spinner.finish_and_clear();
            let user = user?;

            output::notice(
                format!("Signed in as {} ({})", user.user_name, user.role),
                global.quiet,
            );
            Ok(())
        }

        AuthCommand::Logout => {
            store.auth().logout().await?;
            output::notice("Signed out", global.quiet);
            Ok(())
        }

        AuthCommand::Register {
            name,
            email,
            phone,
            role,
        } => {
            let password = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
            let again = rpassword::prompt_password("Confirm password: ").map_err(util::prompt_err)?;
            if password != again {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "the two passwords do not match".into(),
                });
            }
            let request = RegisterRequest {
                user_name: name,
                email,
                phone,
                role: role.into(),
                password: SecretString::from(password),
            };
            let created = store.auth().register(&request).await?;

            match created {
                Some(user) => {
                    let out = output::render_single(&global.output, &user, user_detail, |u| {
                        u.id.to_string()
                    });
                    output::print_output(&out, global.quiet);
                }
                None => output::notice(
                    format!("Account created for {}. Sign in with: besthub auth login", request.email),
                    global.quiet,
                ),
            }
            Ok(())
        }

        AuthCommand::Whoami => {
            let user = util::current_user(store).await?;
            let out = output::render_single(&global.output, &user, user_detail, |u| {
                u.email.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
