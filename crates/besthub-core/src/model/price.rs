// ── Price book ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bundle::DataAmount;
use super::entity_id::EntityId;
use super::money::Money;
use super::network::Network;
use super::user::Role;

/// One row of a network/role price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedPackage {
    /// Empty until the backend has stored the package.
    pub id: EntityId,
    pub package_name: String,
    pub data_amount: Option<DataAmount>,
    pub price: Money,
    pub validity: Option<String>,
}

/// Admin price tables keyed by network, then by priced role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBook {
    tables: BTreeMap<Network, BTreeMap<Role, Vec<PricedPackage>>>,
}

impl PriceBook {
    pub fn table(&self, network: Network, role: Role) -> &[PricedPackage] {
        self.tables
            .get(&network)
            .and_then(|by_role| by_role.get(&role))
            .map_or(&[], Vec::as_slice)
    }

    pub fn table_mut(&mut self, network: Network, role: Role) -> &mut Vec<PricedPackage> {
        self.tables.entry(network).or_default().entry(role).or_default()
    }

    pub fn set_table(&mut self, network: Network, role: Role, packages: Vec<PricedPackage>) {
        *self.table_mut(network, role) = packages;
    }

    /// Every `(network, role, packages)` triple, in network then role order.
    pub fn iter(&self) -> impl Iterator<Item = (Network, Role, &[PricedPackage])> {
        self.tables.iter().flat_map(|(network, by_role)| {
            by_role
                .iter()
                .map(move |(role, packages)| (*network, *role, packages.as_slice()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(|by_role| by_role.values().all(Vec::is_empty))
    }
}
