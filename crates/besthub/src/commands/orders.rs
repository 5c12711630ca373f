//! Shopper order handlers: history, details and card payment.

use tabled::Tabled;

use besthub_core::view::{BundleSort, OrderFilter};
use besthub_core::{EntityId, Order, PurchaseRequest, Store};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output::{self, Tone};

use super::{bundles, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct OrderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Recipient")]
    recipient: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Placed")]
    placed: String,
}

impl OrderRow {
    pub(crate) fn new(o: &Order, color: bool) -> Self {
        Self {
            id: o.id.to_string(),
            network: util::network(o.network),
            package: o.package_name.clone(),
            recipient: o.recipient.clone(),
            amount: o.amount.to_string(),
            status: output::paint_status(o.status, Tone::from(o.status), color),
            placed: util::date(o.created_at),
        }
    }
}

pub(crate) fn order_detail(o: &Order) -> String {
    output::detail_block(&[
        ("ID", o.id.to_string()),
        ("Reference", util::opt(o.reference.as_deref())),
        ("Network", util::network(o.network)),
        ("Package", o.package_name.clone()),
        (
            "Data",
            o.data_amount
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string),
        ),
        ("Recipient", o.recipient.clone()),
        ("Amount", o.amount.to_string()),
        ("Status", o.status.to_string()),
        ("Customer", util::opt(o.user_name.as_deref())),
        ("Email", util::opt(o.email.as_deref())),
        ("Placed", util::date(o.created_at)),
        ("Updated", util::date(o.updated_at)),
    ])
}

/// Render `orders` (already filtered) as a list.
pub(crate) fn print_orders(orders: &[Order], global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        orders,
        |o| OrderRow::new(o, color),
        |o| o.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(store: &Store, args: OrdersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::List { status, search } => {
            let user = util::current_user(store).await?;
            let spinner = output::spinner(global, "Loading orders...");
            let orders = store.shop_orders().fetch_for_user(&user.id).await;
            spinner.finish_and_clear();
            let orders = orders?;

            let filter = OrderFilter {
                status: status.map(Into::into),
                search: search.unwrap_or_default(),
            };
            let visible: Vec<Order> = filter.apply(&orders).into_iter().cloned().collect();
            print_orders(&visible, global);
            Ok(())
        }

        OrdersCommand::Get { id } => {
            util::current_user(store).await?;
            let order = store.shop_orders().details(&EntityId::from(id)).await?;
            let out = output::render_single(&global.output, &order, order_detail, |o| {
                o.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OrdersCommand::Checkout {
            network,
            package,
            recipient,
        } => {
            let user = util::current_user(store).await?;
            let network = network.into();
            let listing = bundles::load(store, network, BundleSort::PriceAsc, global).await?;
            let bundle = util::resolve_bundle(&listing, &package)?;

            let request = PurchaseRequest {
                bundle_id: bundle.id.clone(),
                package_name: bundle.package_name.clone(),
                network: bundle.network.unwrap_or(network),
                recipient,
                amount: bundle.price,
                user_id: user.id.clone(),
                email: Some(user.email.clone()),
            };
            let checkout = store.shop_orders().create_card_order(&request).await?;

            let out = output::render_single(
                &global.output,
                &checkout,
                |c| {
                    output::detail_block(&[
                        ("Pay at", c.authorization_url.clone()),
                        (
                            "Order",
                            c.order_id
                                .as_ref()
                                .map_or_else(|| "-".into(), ToString::to_string),
                        ),
                    ])
                },
                |c| c.authorization_url.clone(),
            );
            output::print_output(&out, global.quiet);
            output::notice(
                "After paying, confirm with: besthub orders capture <reference>",
                global.quiet,
            );
            Ok(())
        }

        OrdersCommand::Capture { reference } => {
            util::current_user(store).await?;
            let captured = store.shop_orders().capture_payment(&reference).await?;
            match captured {
                Some(order) => {
                    let out = output::render_single(&global.output, &order, order_detail, |o| {
                        o.id.to_string()
                    });
                    output::print_output(&out, global.quiet);
                }
                None => output::notice("Payment confirmed", global.quiet),
            }
            Ok(())
        }
    }
}
