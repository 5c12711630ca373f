//! Platform-wide admin dashboard.

use std::fmt::Write;

use besthub_core::{DashboardSummary, Store};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn summary_detail(s: &DashboardSummary) -> String {
    let mut out = output::detail_block(&[
        ("Users", s.total_users.to_string()),
        ("Customers", s.total_customers.to_string()),
        ("Active customers", s.active_customers.to_string()),
        ("Transactions", s.total_transactions.to_string()),
        ("Orders today", s.today_orders.to_string()),
        ("Revenue", s.total_revenue.to_string()),
        ("Sales today", s.today_sales.to_string()),
        ("Customer balances", s.total_customer_balance.to_string()),
    ]);
    if !s.sales_by_network.is_empty() {
        let _ = write!(out, "\n\nSales by network");
        for (network, amount) in &s.sales_by_network {
            let _ = write!(out, "\n  {:<11} {amount}", network.label());
        }
    }
    out
}

pub(super) async fn handle(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = output::spinner(global, "Loading dashboard...");
    let summary = store.admin_dashboard().fetch().await;
    spinner.finish_and_clear();
    let summary = summary?;

    let out = output::render_single(&global.output, &summary, summary_detail, |s| {
        s.total_revenue.major_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
