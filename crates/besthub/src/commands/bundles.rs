//! Bundle listing.

use tabled::Tabled;

use besthub_core::view::BundleSort;
use besthub_core::{DataBundle, Network, Store};

use crate::cli::{BundleSortArg, BundlesArgs, BundlesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
pub(crate) struct BundleRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Data")]
    data: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Validity")]
    validity: String,
}

impl From<&DataBundle> for BundleRow {
    fn from(b: &DataBundle) -> Self {
        let price = match b.original_price {
            Some(was) if was > b.price => format!("{} (was {})", b.price, was.major_string()),
            _ => b.price.to_string(),
        };
        Self {
            id: b.id.to_string(),
            package: b.package_name.clone(),
            data: b
                .data_amount
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string),
            price,
            validity: util::opt(b.validity.as_deref()),
        }
    }
}

impl From<BundleSortArg> for BundleSort {
    fn from(arg: BundleSortArg) -> Self {
        match arg {
            BundleSortArg::PriceAsc => Self::PriceAsc,
            BundleSortArg::PriceDesc => Self::PriceDesc,
            BundleSortArg::DataAsc => Self::DataAsc,
            BundleSortArg::DataDesc => Self::DataDesc,
        }
    }
}

/// Fetch `network`'s bundles, sorted.
pub(crate) async fn load(
    store: &Store,
    network: Network,
    sort: BundleSort,
    global: &GlobalOpts,
) -> Result<Vec<DataBundle>, CliError> {
    let spinner = output::spinner(global, &format!("Loading {network} bundles..."));
    let bundles = store.products().fetch_by_network(network).await;
    spinner.finish_and_clear();
    let mut bundles = bundles?.as_ref().clone();
    sort.sort(&mut bundles);
    Ok(bundles)
}

pub async fn handle(store: &Store, args: BundlesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        BundlesCommand::List { network, sort } => {
            let bundles = load(store, network.into(), sort.into(), global).await?;
            let out = output::render_list(&global.output, &bundles, |x| BundleRow::from(x), |b| {
                b.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
