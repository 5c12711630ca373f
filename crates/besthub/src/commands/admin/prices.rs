//! Admin price book.

use serde::Deserialize;
use tabled::Tabled;

use besthub_core::{DataAmount, EntityId, Money, Network, PricedPackage, Role, Store};

use crate::cli::{AdminPricesArgs, AdminPricesCommand, GlobalOpts};
use crate::commands::util;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Role")]
    role: String,
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

/// A price row flattened with its table's keys, for listing.
#[derive(serde::Serialize)]
struct ListedPackage {
    network: Network,
    role: Role,
    #[serde(flatten)]
    package: PricedPackage,
}

impl From<&ListedPackage> for PriceRow {
    fn from(l: &ListedPackage) -> Self {
        let p = &l.package;
        Self {
            network: l.network.label().into(),
            role: l.role.to_string(),
            id: util::opt(Some(p.id.as_str())),
            package: p.package_name.clone(),
            data: p
                .data_amount
                .as_ref()
                .map_or_else(|| "-".into(), ToString::to_string),
            price: p.price.to_string(),
            validity: util::opt(p.validity.as_deref()),
        }
    }
}

// ── File input ──────────────────────────────────────────────────────

/// One package as written in a `--from-file` table.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageInput {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    package_name: String,
    #[serde(default)]
    data_amount: Option<String>,
    price: serde_json::Value,
    #[serde(default)]
    validity: Option<String>,
}

impl PackageInput {
    fn into_package(self) -> Result<PricedPackage, CliError> {
        let price = match &self.price {
            serde_json::Value::Number(n) => Money::from_major_lenient(&n.to_string()),
            serde_json::Value::String(s) => s.parse(),
            other => {
                return Err(CliError::Validation {
                    field: "price".into(),
                    reason: format!("expected a number, got {other}"),
                });
            }
        }
        .map_err(|e| CliError::Validation {
            field: "price".into(),
            reason: format!("{}: {e}", self.package_name),
        })?;
        Ok(PricedPackage {
            id: EntityId::from(self.id.unwrap_or_default()),
            package_name: self.package_name,
            data_amount: self.data_amount.as_deref().map(DataAmount::parse),
            price,
            validity: self.validity,
        })
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub(super) async fn handle(
    store: &Store,
    args: AdminPricesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let prices = store.admin_prices();
    match args.command {
        AdminPricesCommand::List { network, role } => {
            let network: Option<Network> = network.map(Into::into);
            let role: Option<Role> = role.map(Into::into);
            let book = prices.fetch_all().await?;

            let rows: Vec<ListedPackage> = book
                .iter()
                .filter(|(n, r, _)| network.is_none_or(|x| x == *n) && role.is_none_or(|x| x == *r))
                .flat_map(|(n, r, table)| {
                    table.iter().map(move |p| ListedPackage {
                        network: n,
                        role: r,
                        package: p.clone(),
                    })
                })
                .collect();
            let out = output::render_list(&global.output, &rows, |x| PriceRow::from(x), |l| {
                l.package.id.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminPricesCommand::Update {
            network,
            role,
            from_file,
        } => {
            let inputs: Vec<PackageInput> = util::read_json_file(&from_file)?;
            let packages = inputs
                .into_iter()
                .map(PackageInput::into_package)
                .collect::<Result<Vec<_>, _>>()?;
            let (network, role): (Network, Role) = (network.into(), role.into());

            if !util::confirm(
                &format!(
                    "Replace the {network} {role} table with {} packages?",
                    packages.len()
                ),
                global.yes,
            )? {
                return Ok(());
            }
            prices.update_prices(network, role, packages).await?;
            output::notice(format!("Updated {network} {role} prices"), global.quiet);
            Ok(())
        }

        AdminPricesCommand::Add {
            network,
            role,
            name,
            data,
            price,
            validity,
        } => {
            let package = PricedPackage {
                id: EntityId::default(),
                package_name: name,
                data_amount: data.as_deref().map(DataAmount::parse),
                price: util::parse_money("price", &price)?,
                validity,
            };
            let stored = prices.add_package(network.into(), role.into(), package).await?;
            let out = output::render_single(
                &global.output,
                &stored,
                |p| {
                    output::detail_block(&[
                        ("ID", util::opt(Some(p.id.as_str()))),
                        ("Package", p.package_name.clone()),
                        ("Price", p.price.to_string()),
                    ])
                },
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminPricesCommand::Delete { network, role, id } => {
            let (network, role): (Network, Role) = (network.into(), role.into());
            if !util::confirm(&format!("Delete package {id} from {network} {role}?"), global.yes)? {
                return Ok(());
            }
            prices.delete_package(network, role, &EntityId::from(id)).await?;
            output::notice("Package deleted", global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn file_packages_accept_numeric_and_text_prices() {
        let inputs: Vec<PackageInput> = serde_json::from_str(
            r#"[
                {"packageName": "MTN 1GB", "dataAmount": "1GB", "price": 5.5},
                {"_id": "p2", "packageName": "MTN 2GB", "price": "10.00", "validity": "30 days"}
            ]"#,
        )
        .unwrap();
        let packages: Vec<PricedPackage> = inputs
            .into_iter()
            .map(|i| i.into_package().unwrap())
            .collect();
        assert_eq!(packages[0].price, Money::from_minor(550));
        assert!(packages[0].id.is_empty());
        assert_eq!(packages[1].id.as_str(), "p2");
        assert_eq!(packages[1].price, Money::from_major(10));
    }

    #[test]
    fn file_package_without_a_price_is_refused() {
        let input: PackageInput =
            serde_json::from_str(r#"{"packageName": "AT 1GB", "price": null}"#).unwrap();
        assert!(matches!(input.into_package(), Err(CliError::Validation { .. })));
    }
}
