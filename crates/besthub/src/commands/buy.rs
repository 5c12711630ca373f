//! Wallet purchase, driven through the purchase wizard.
//!
//! Every missing flag is asked for interactively, so `besthub buy` on its
//! own walks through network, package and recipient (entered twice).

use dialoguer::{Input, Select};

use besthub_core::view::{BundleSort, PurchaseWizard};
use besthub_core::{Network, Store};

use crate::cli::{BuyArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::{bundles, orders, util};

const NETWORKS: [Network; 3] = [Network::Mtn, Network::Telecel, Network::AirtelTigo];

fn pick_network() -> Result<Network, CliError> {
    let labels: Vec<&str> = NETWORKS.iter().map(|n| n.label()).collect();
    let index = Select::new()
        .with_prompt("Network")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(util::prompt_err)?;
    Ok(NETWORKS[index])
}

fn prompt_recipient(prompt: &str) -> Result<String, CliError> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(util::prompt_err)
}

pub async fn handle(store: &Store, args: BuyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let user = util::current_user(store).await?;

    let network = match args.network {
        Some(n) => n.into(),
        None => pick_network()?,
    };
    let mut wizard = PurchaseWizard::new(network);

    // ── Package ──
    let listing = bundles::load(store, network, BundleSort::PriceAsc, global).await?;
    if listing.is_empty() {
        return Err(CliError::NotFound {
            resource_type: "bundle".into(),
            identifier: network.label().into(),
            list_command: "bundles list --network <network>".into(),
        });
    }
    let bundle = match args.package.as_deref() {
        Some(needle) => util::resolve_bundle(&listing, needle)?,
        None => {
            let items: Vec<String> = listing
                .iter()
                .map(|b| format!("{}  {}", b.package_name, b.price))
                .collect();
            let index = Select::new()
                .with_prompt("Package")
                .items(&items)
                .default(0)
                .interact()
                .map_err(util::prompt_err)?;
            listing[index].clone()
        }
    };
    wizard.select_package(bundle)?;

    // ── Recipient ──
    let first = match args.recipient {
        Some(r) => r,
        None => prompt_recipient("Recipient number")?,
    };
    let second = match args.confirm_recipient {
        Some(r) => r,
        None => prompt_recipient("Confirm recipient number")?,
    };
    // Stray whitespace from flags or pasted numbers is dropped here
    wizard.enter_recipients(first.trim(), second.trim())?;
    wizard.proceed()?;

    // ── Confirm ──
    let summary = match wizard.package() {
        Some(b) => format!(
            "Buy {} for {} at {}?",
            b.package_name,
            wizard.recipient(),
            b.price
        ),
        None => return Err(CliError::Internal("no package selected".into())),
    };
    if !util::confirm(&summary, global.yes)? {
        wizard.cancel();
        output::notice("Purchase cancelled", global.quiet);
        return Ok(());
    }

    let placed = wizard
        .confirm(&user, |request| async move {
            store.shop_orders().purchase(&request).await
        })
        .await?;

    match placed {
        Some(order) => {
            let out = output::render_single(&global.output, &order, orders::order_detail, |o| {
                o.id.to_string()
            });
            output::print_output(&out, global.quiet);
        }
        None => output::notice("Order placed", global.quiet),
    }
    let balance = *store.wallet().balance_state().data;
    output::notice(format!("Wallet balance: {balance}"), global.quiet);
    Ok(())
}
