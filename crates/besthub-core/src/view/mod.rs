// ── Headless view models ──
//
// Everything a screen needs that is not a network call: list filters,
// the admin selection set, the purchase wizard and display aggregates.

pub mod filter;
pub mod selection;
pub mod stats;
pub mod wizard;

pub use filter::{BundleSort, OrderFilter, TransactionFilter, UserFilter, WalletFilter};
pub use selection::Selection;
pub use stats::{OrderStats, UserStats, today_sales_by_network, wallet_total};
pub use wizard::{PurchaseWizard, WizardStep, recipients_match};
