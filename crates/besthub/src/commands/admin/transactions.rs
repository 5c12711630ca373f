//! Platform transaction ledger.

use besthub_core::{Store, TransactionStats};

use crate::cli::{AdminTransactionsArgs, AdminTransactionsCommand, GlobalOpts};
use crate::commands::wallet::print_transactions;
use crate::error::CliError;
use crate::output;

fn stats_detail(s: &TransactionStats) -> String {
    let mut pairs = vec![
        ("Transactions", s.total_transactions.to_string()),
        ("Today", s.today_transactions.to_string()),
        ("Total amount", s.total_amount.to_string()),
        ("Top-ups", s.total_topups.to_string()),
        ("Purchases", s.total_purchases.to_string()),
    ];
    // Figures the backend adds beyond the known ones
    pairs.extend(s.extra.iter().map(|(k, v)| (k.as_str(), v.to_string())));
    output::detail_block(&pairs)
}

pub(super) async fn handle(
    store: &Store,
    args: AdminTransactionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ledger = store.admin_transactions();
    match args.command {
        AdminTransactionsCommand::List(filter) => {
            let spinner = output::spinner(global, "Loading transactions...");
            let txs = ledger.fetch_all().await;
            spinner.finish_and_clear();
            print_transactions(&txs?, &filter.into(), global);
            Ok(())
        }

        AdminTransactionsCommand::Stats => {
            let stats = ledger.fetch_stats().await?;
            let out = output::render_single(&global.output, &stats, stats_detail, |s| {
                s.total_transactions.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
