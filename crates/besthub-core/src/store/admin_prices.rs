// ── Admin: price book ──

use std::sync::Arc;

use tracing::info;

use besthub_api::ApiClient;
use besthub_api::models::ApiPricedPackage;

use super::slice::{Slice, SliceState};
use crate::convert;
use crate::error::CoreError;
use crate::model::{EntityId, Network, PriceBook, PricedPackage, Role};
use crate::stream::SliceStream;

pub struct AdminPrices {
    api: Arc<ApiClient>,
    book: Slice<PriceBook>,
}

impl AdminPrices {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            book: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<PriceBook> {
        self.book.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<PriceBook> {
        self.book.subscribe()
    }

    pub fn clear_error(&self) {
        self.book.clear_error();
    }

    pub async fn fetch_all(&self) -> Result<Arc<PriceBook>, CoreError> {
        self.book
            .fetch_with(async { Ok(convert::price_book(self.api.price_book().await?)) })
            .await
    }

    /// Replace one network/role table. The stored table replaces the local
    /// one; if the backend echoes nothing the submitted rows are kept.
    pub async fn update_prices(
        &self,
        network: Network,
        role: Role,
        packages: Vec<PricedPackage>,
    ) -> Result<(), CoreError> {
        self.guard(role, packages.iter())?;
        let wire: Vec<ApiPricedPackage> = packages.iter().map(ApiPricedPackage::from).collect();
        let role_key = role.to_string();
        let stored = self
            .book
            .update_with(
                async {
                    self.api
                        .replace_prices(network.price_key(), &role_key, &wire)
                        .await
                        .map_err(CoreError::from)
                },
                |book, _, stored: &Vec<ApiPricedPackage>| {
                    let table = if stored.is_empty() {
                        packages
                    } else {
                        stored.iter().cloned().map(PricedPackage::from).collect()
                    };
                    book.set_table(network, role, table);
                },
            )
            .await?;
        info!(%network, %role, rows = stored.len(), "price table replaced");
        Ok(())
    }

    /// Add one package to a table. Returns it as stored.
    pub async fn add_package(
        &self,
        network: Network,
        role: Role,
        package: PricedPackage,
    ) -> Result<PricedPackage, CoreError> {
        self.guard(role, std::iter::once(&package))?;
        let wire = ApiPricedPackage::from(&package);
        let role_key = role.to_string();
        let stored = self
            .book
            .update_with(
                async {
                    self.api
                        .add_priced_package(network.price_key(), &role_key, &wire)
                        .await
                        .map(PricedPackage::from)
                        .map_err(CoreError::from)
                },
                |book, _, stored: &PricedPackage| {
                    book.table_mut(network, role).push(stored.clone());
                },
            )
            .await?;
        info!(%network, %role, package = %stored.package_name, "priced package added");
        Ok(stored)
    }

    pub async fn delete_package(
        &self,
        network: Network,
        role: Role,
        package_id: &EntityId,
    ) -> Result<(), CoreError> {
        self.guard(role, std::iter::empty())?;
        let role_key = role.to_string();
        self.book
            .update_with(
                async {
                    self.api
                        .delete_priced_package(network.price_key(), &role_key, package_id.as_str())
                        .await
                        .map_err(CoreError::from)
                },
                |book, _, _| {
                    book.table_mut(network, role).retain(|p| &p.id != package_id);
                },
            )
            .await?;
        info!(%network, %role, %package_id, "priced package deleted");
        Ok(())
    }

    /// Only the customer, agent and wholesaler tables exist, and every
    /// row needs a name and a positive price.
    fn guard<'a>(
        &self,
        role: Role,
        packages: impl Iterator<Item = &'a PricedPackage>,
    ) -> Result<(), CoreError> {
        let result = if Role::PRICED.contains(&role) {
            packages
                .map(|p| {
                    if p.package_name.trim().is_empty() {
                        Err(CoreError::validation("packageName", "is required"))
                    } else if !p.price.is_positive() {
                        Err(CoreError::validation(
                            "price",
                            format!("{} must cost more than zero", p.package_name),
                        ))
                    } else {
                        Ok(())
                    }
                })
                .collect::<Result<(), _>>()
        } else {
            Err(CoreError::validation("role", format!("{role} has no price table")))
        };
        result.inspect_err(|err| self.book.record_error(err))
    }
}
