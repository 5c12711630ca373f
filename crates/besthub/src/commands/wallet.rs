//! Wallet handlers: balance, top-up and history.

use tabled::Tabled;

use besthub_core::view::TransactionFilter;
use besthub_core::{Store, Transaction};

use crate::cli::{GlobalOpts, WalletArgs, WalletCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::util;

#[derive(Tabled)]
pub(crate) struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl TransactionRow {
    pub(crate) fn new(t: &Transaction, color: bool) -> Self {
        Self {
            id: t.id.to_string(),
            kind: t.kind.to_string(),
            amount: t.amount.to_string(),
            status: output::paint_status(t.status, Tone::from(t.status), color),
            description: util::opt(t.description.as_deref()),
            user: util::opt(t.user_name.as_deref().or(t.email.as_deref())),
            date: util::date(t.created_at),
        }
    }
}

/// Filter `txs` and render them.
pub(crate) fn print_transactions(txs: &[Transaction], filter: &TransactionFilter, global: &GlobalOpts) {
    let visible: Vec<Transaction> = filter.apply(txs).into_iter().cloned().collect();
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &visible,
        |t| TransactionRow::new(t, color),
        |t| t.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(store: &Store, args: WalletArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        WalletCommand::Balance => {
            let user = util::current_user(store).await?;
            let balance = store.wallet().fetch_balance(&user.id).await?;
            let out = output::render_single(
                &global.output,
                &balance,
                ToString::to_string,
                |b| b.major_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WalletCommand::Topup { amount, email } => {
            let user = util::current_user(store).await?;
            let amount = util::parse_money("amount", &amount)?;
            let email = email.unwrap_or(user.email);
            let session = store.wallet().top_up(amount, &email).await?;

            let out = output::render_single(
                &global.output,
                &session,
                |s| {
                    output::detail_block(&[
                        ("Amount", s.amount.to_string()),
                        ("Pay at", s.authorization_url.clone()),
                        ("Reference", util::opt(s.reference.as_deref())),
                    ])
                },
                |s| s.authorization_url.clone(),
            );
            output::print_output(&out, global.quiet);
            output::notice(
                "After paying, confirm with: besthub wallet verify",
                global.quiet,
            );
            Ok(())
        }

        WalletCommand::Verify { reference } => {
            util::current_user(store).await?;
            let reference = reference
                .or_else(|| store.session().pending_topup())
                .ok_or_else(|| CliError::Validation {
                    field: "reference".into(),
                    reason: "no top-up in progress; pass the payment reference".into(),
                })?;
            let receipt = store.wallet().verify_top_up(&reference).await?;

            let out = output::render_single(
                &global.output,
                &receipt,
                |r| {
                    let mut pairs = vec![("New balance", r.new_balance.to_string())];
                    if let Some(tx) = &r.credited {
                        pairs.push(("Credited", tx.amount.to_string()));
                    }
                    output::detail_block(&pairs)
                },
                |r| r.new_balance.major_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WalletCommand::Transactions(filter) => {
            let user = util::current_user(store).await?;
            let txs = store.wallet().fetch_transactions(&user.id).await?;
            print_transactions(&txs, &filter.into(), global);
            Ok(())
        }
    }
}
