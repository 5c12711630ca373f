//! Shopper dashboard.

use std::fmt::Write;

use besthub_core::{ShopSummary, Store};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::orders::OrderRow;

fn summary_detail(s: &ShopSummary, color: bool) -> String {
    let stats = &s.order_stats;
    let mut out = output::detail_block(&[
        ("Balance", s.balance.to_string()),
        ("Orders", stats.total.to_string()),
        ("Pending", stats.pending.to_string()),
        ("Processing", stats.processing.to_string()),
        ("Completed", stats.completed.to_string()),
        ("Failed", stats.failed.to_string()),
        ("Spent", stats.completed_revenue.to_string()),
        ("Orders today", s.today_orders.to_string()),
    ]);

    let _ = writeln!(out, "\n\nToday's sales");
    for (network, amount) in &s.today_sales {
        let _ = writeln!(out, "  {:<11} {amount}", network.label());
    }

    if !s.recent_orders.is_empty() {
        let rows: Vec<OrderRow> = s
            .recent_orders
            .iter()
            .map(|o| OrderRow::new(o, color))
            .collect();
        let _ = write!(
            out,
            "\nRecent orders\n{}",
            tabled::Table::new(rows).with(tabled::settings::Style::rounded())
        );
    }
    out
}

pub async fn handle(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let user = super::util::current_user(store).await?;
    let spinner = output::spinner(global, "Loading dashboard...");
    let summary = store.shop_dashboard().load(&user.id).await;
    spinner.finish_and_clear();
    let summary = summary?;

    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        summary.as_ref(),
        |s| summary_detail(s, color),
        |s| s.balance.major_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
