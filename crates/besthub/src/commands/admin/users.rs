//! Admin user management.

use tabled::Tabled;

use besthub_core::view::{UserFilter, UserStats};
use besthub_core::{EntityId, Store, User};

use crate::cli::{AdminUsersArgs, AdminUsersCommand, GlobalOpts};
use crate::commands::{auth::user_detail, util};
use crate::error::CliError;
use crate::output::{self, Tone};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl UserRow {
    fn new(u: &User, color: bool) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.user_name.clone(),
            email: u.email.clone(),
            phone: util::opt(u.phone.as_deref()),
            role: u.role.to_string(),
            status: output::paint_status(u.status, Tone::from(u.status), color),
            balance: u
                .wallet_balance
                .map_or_else(|| "-".into(), |b| b.to_string()),
        }
    }
}

fn stats_line(stats: &UserStats) -> String {
    format!(
        "{} users: {} admins, {} customers, {} agents, {} wholesalers ({} pending, {} suspended)",
        stats.total,
        stats.admins,
        stats.customers,
        stats.agents,
        stats.wholesalers,
        stats.pending,
        stats.suspended
    )
}

/// Look up `id` in the freshly loaded list.
fn find_user(users: &[User], id: &EntityId) -> Result<User, CliError> {
    users.iter().find(|u| &u.id == id).cloned().ok_or_else(|| CliError::NotFound {
        resource_type: "user".into(),
        identifier: id.to_string(),
        list_command: "admin users list".into(),
    })
}

pub(super) async fn handle(
    store: &Store,
    admin: &User,
    args: AdminUsersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let users = store.admin_users();
    match args.command {
        AdminUsersCommand::List {
            role,
            status,
            search,
        } => {
            let spinner = output::spinner(global, "Loading users...");
            let all = users.fetch_all().await;
            spinner.finish_and_clear();
            let all = all?;

            let filter = UserFilter {
                role: role.map(Into::into),
                status: status.map(Into::into),
                search: search.unwrap_or_default(),
            };
            let visible: Vec<User> = filter.apply(&all).into_iter().cloned().collect();
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &visible,
                |u| UserRow::new(u, color),
                |u| u.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            if matches!(global.output, crate::cli::OutputFormat::Table) {
                output::notice(stats_line(&UserStats::from_users(all.iter())), global.quiet);
            }
            Ok(())
        }

        AdminUsersCommand::Role { id, role } => {
            let id = EntityId::from(id);
            users.fetch_all().await?;
            users.update_role(&id, role.into()).await?;
            let user = find_user(&users.state().data, &id)?;
            let out = output::render_single(&global.output, &user, user_detail, |u| u.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminUsersCommand::Status { id, status } => {
            let id = EntityId::from(id);
            users.fetch_all().await?;
            users.update_status(&id, status.into()).await?;
            let user = find_user(&users.state().data, &id)?;
            let out = output::render_single(&global.output, &user, user_detail, |u| u.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminUsersCommand::Delete { id } => {
            let id = EntityId::from(id);
            let all = users.fetch_all().await?;
            let target = find_user(&all, &id)?;

            if !util::confirm(
                &format!("Delete {} ({})? This cannot be undone.", target.user_name, target.email),
                global.yes,
            )? {
                return Ok(());
            }
            users.delete_user(&id, admin).await?;
            output::notice(format!("Deleted user {}", target.email), global.quiet);
            Ok(())
        }
    }
}
