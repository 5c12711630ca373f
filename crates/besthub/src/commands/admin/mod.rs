//! Admin command handlers. Every subcommand requires an admin session.

mod dashboard;
mod orders;
mod prices;
mod settings;
mod transactions;
mod users;
mod wallets;

use besthub_core::Store;

use crate::cli::{AdminArgs, AdminCommand, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(store: &Store, args: AdminArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let admin = util::require_admin(store).await?;
    tracing::debug!(admin = %admin.email, "admin session confirmed");

    match args.command {
        AdminCommand::Users(args) => users::handle(store, &admin, args, global).await,
        AdminCommand::Orders(args) => orders::handle(store, args, global).await,
        AdminCommand::Prices(args) => prices::handle(store, args, global).await,
        AdminCommand::Wallets(args) => wallets::handle(store, args, global).await,
        AdminCommand::Transactions(args) => transactions::handle(store, args, global).await,
        AdminCommand::Dashboard => dashboard::handle(store, global).await,
        AdminCommand::Settings(args) => settings::handle(store, args, global).await,
    }
}
