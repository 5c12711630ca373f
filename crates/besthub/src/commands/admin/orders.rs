//! Admin order queues, one per network.

use tracing::warn;

use besthub_core::view::{OrderFilter, Selection};
use besthub_core::{EntityId, Network, Order, Store};

use crate::cli::{AdminOrdersArgs, AdminOrdersCommand, GlobalOpts, NetworkArg};
use crate::commands::orders::{order_detail, print_orders};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

const NETWORKS: [Network; 3] = [Network::Mtn, Network::Telecel, Network::AirtelTigo];

fn require_network(network: Option<NetworkArg>) -> Result<Network, CliError> {
    network.map(Into::into).ok_or_else(|| CliError::Validation {
        field: "network".into(),
        reason: "pass --network (mtn, telecel or airteltigo)".into(),
    })
}

async fn load(store: &Store, network: Network, all: bool) -> Result<Vec<Order>, CliError> {
    let queue = store.admin_orders(network);
    let orders = if all {
        queue.fetch_all_alternative().await?
    } else {
        queue.fetch_all().await?
    };
    Ok(orders.as_ref().clone())
}

pub(super) async fn handle(
    store: &Store,
    args: AdminOrdersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AdminOrdersCommand::List {
            status,
            search,
            all,
        } => {
            let networks: Vec<Network> = match args.network {
                Some(n) => vec![n.into()],
                None => NETWORKS.to_vec(),
            };
            let spinner = output::spinner(global, "Loading orders...");
            let mut orders = Vec::new();
            let mut failures = Vec::new();
            for network in networks {
                match load(store, network, all).await {
                    Ok(batch) => orders.extend(batch),
                    Err(err) => failures.push((network, err)),
                }
            }
            spinner.finish_and_clear();
            if orders.is_empty() {
                if let Some((_, err)) = failures.pop() {
                    return Err(err);
                }
            }
            // Partial listing: name every queue that is missing from it
            for (network, err) in &failures {
                warn!(%network, error = %err, "order queue failed to load");
                output::notice(
                    format!("{} orders could not be loaded: {err}", network.label()),
                    global.quiet,
                );
            }

            let filter = OrderFilter {
                status: status.map(Into::into),
                search: search.unwrap_or_default(),
            };
            let visible: Vec<Order> = filter.apply(&orders).into_iter().cloned().collect();
            print_orders(&visible, global);
            Ok(())
        }

        AdminOrdersCommand::Status { id, status } => {
            let network = require_network(args.network)?;
            let queue = store.admin_orders(network);
            let id = EntityId::from(id);
            queue.fetch_all().await?;
            queue.update_status(&id, status.into()).await?;

            let state = queue.state();
            match state.data.iter().find(|o| o.id == id) {
                Some(order) => {
                    let out = output::render_single(&global.output, order, order_detail, |o| {
                        o.id.to_string()
                    });
                    output::print_output(&out, global.quiet);
                }
                None => output::notice(format!("Order {id} updated"), global.quiet),
            }
            Ok(())
        }

        AdminOrdersCommand::BulkStatus { ids, status } => {
            let network = require_network(args.network)?;
            let queue = store.admin_orders(network);
            let status = status.into();

            let mut selection = Selection::new();
            for id in util::id_list(&ids) {
                selection.insert(id);
            }
            if !util::confirm(
                &format!("Mark {} {network} orders as {status}?", selection.len()),
                global.yes,
            )? {
                return Ok(());
            }

            queue.fetch_all().await?;
            let requested = selection.len();
            let updated = queue.bulk_update_status(&mut selection, status).await?;
            let count = updated.map_or(requested, |n| usize::try_from(n).unwrap_or(requested));
            output::notice(format!("Updated {count} orders to {status}"), global.quiet);
            Ok(())
        }
    }
}
