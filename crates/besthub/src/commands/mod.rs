//! Command handlers, one module per top-level subcommand.

pub mod admin;
pub mod auth;
pub mod bundles;
pub mod buy;
pub mod config_cmd;
pub mod dashboard;
pub mod orders;
pub mod util;
pub mod wallet;

use besthub_core::Store;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a backend-bound command to its handler.
pub async fn dispatch(cmd: Command, store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Auth(args) => auth::handle(store, args, global).await,
        Command::Bundles(args) => bundles::handle(store, args, global).await,
        Command::Buy(args) => buy::handle(store, args, global).await,
        Command::Orders(args) => orders::handle(store, args, global).await,
        Command::Wallet(args) => wallet::handle(store, args, global).await,
        Command::Dashboard => dashboard::handle(store, global).await,
        Command::Admin(args) => admin::handle(store, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions are handled before connecting".into(),
        )),
    }
}
