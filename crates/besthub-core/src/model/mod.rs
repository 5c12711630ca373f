// ── Domain model ──
//
// Typed, validated views of the backend's JSON records. Wire structs in
// `besthub_api::models` are converted into these by `crate::convert`.

pub mod bundle;
pub mod dashboard;
pub mod entity_id;
pub mod money;
pub mod network;
pub mod order;
pub mod price;
pub mod settings;
pub mod transaction;
pub mod user;
pub mod wallet;

pub use bundle::{BundleCategory, DataAmount, DataBundle};
pub use dashboard::{DashboardSummary, TransactionStats};
pub use entity_id::{EntityId, Identified};
pub use money::{Currency, Money, MoneyError};
pub use network::{Network, UnknownNetwork};
pub use order::{Order, OrderStatus};
pub use price::{PriceBook, PricedPackage};
pub use settings::SystemSettings;
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use user::{Role, User, UserStatus};
pub use wallet::{CheckoutSession, TopUpReceipt, TopUpSession, UserWallet};
