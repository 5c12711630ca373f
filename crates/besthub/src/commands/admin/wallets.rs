//! Admin wallet oversight and adjustments.

use tabled::Tabled;

use besthub_core::view::{WalletFilter, wallet_total};
use besthub_core::{EntityId, Store, UserWallet};

use crate::cli::{AdminWalletsArgs, AdminWalletsCommand, GlobalOpts};
use crate::commands::{util, wallet::print_transactions};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "User ID")]
    user_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

impl From<&UserWallet> for WalletRow {
    fn from(w: &UserWallet) -> Self {
        Self {
            user_id: w.user_id.to_string(),
            name: util::opt(w.user_name.as_deref()),
            email: util::opt(w.email.as_deref()),
            phone: util::opt(w.phone.as_deref()),
            balance: w.balance.to_string(),
        }
    }
}

fn wallet_detail(w: &UserWallet) -> String {
    output::detail_block(&[
        ("User ID", w.user_id.to_string()),
        ("Name", util::opt(w.user_name.as_deref())),
        ("Email", util::opt(w.email.as_deref())),
        ("Balance", w.balance.to_string()),
    ])
}

pub(super) async fn handle(
    store: &Store,
    args: AdminWalletsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let wallets = store.admin_wallets();
    match args.command {
        AdminWalletsCommand::List { search } => {
            let all = wallets.fetch_all().await?;
            let filter = WalletFilter {
                search: search.unwrap_or_default(),
            };
            let visible: Vec<UserWallet> = filter.apply(&all).into_iter().cloned().collect();
            let out = output::render_list(&global.output, &visible, |x| WalletRow::from(x), |w| {
                w.user_id.to_string()
            });
            output::print_output(&out, global.quiet);
            if matches!(global.output, crate::cli::OutputFormat::Table) {
                output::notice(
                    format!("Total held: {}", wallet_total(visible.iter())),
                    global.quiet,
                );
            }
            Ok(())
        }

        AdminWalletsCommand::Adjust {
            user_id,
            amount,
            description,
        } => {
            let amount = util::parse_money("amount", &amount)?;
            let verb = if amount.is_negative() { "Debit" } else { "Credit" };
            if !util::confirm(&format!("{verb} {amount} on wallet {user_id}?"), global.yes)? {
                return Ok(());
            }
            let wallet = wallets
                .adjust_balance(&EntityId::from(user_id), amount, &description)
                .await?;
            let out = output::render_single(&global.output, &wallet, wallet_detail, |w| {
                w.balance.major_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminWalletsCommand::Transactions(filter) => {
            let txs = wallets.fetch_transactions().await?;
            print_transactions(&txs, &filter.into(), global);
            Ok(())
        }
    }
}
