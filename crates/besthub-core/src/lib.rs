//! Domain layer between `besthub-api` and the CLI.
//!
//! This crate owns the business rules and the observable client state of
//! the Besthub data-bundle shop:
//!
//! - **[`Store`]**: root composition. Builds one container per domain
//!   (auth, products, shop orders, wallet, dashboards, and the admin
//!   screens) around a shared [`ApiClient`](besthub_api::ApiClient) and a
//!   [`SessionStore`]. [`Store::require_role`] gates admin surfaces.
//!
//! - **[`Slice`]**: the state container every domain uses. Data, loading
//!   and error flags live in a `tokio::sync::watch` channel; fetches carry
//!   request tokens so a stale response can never overwrite a newer one.
//!
//! - **[`SliceStream`]**: subscription handle exposing `current()` /
//!   `latest()` / `changed()` for anything that re-renders on change.
//!
//! - **View models** ([`view`]): filters, bulk selection, the purchase
//!   wizard and display aggregates. Pure and synchronous.
//!
//! - **Domain model** ([`model`]): canonical types with [`Money`] kept in
//!   integer pesewas and [`Network`] owning every backend spelling of a
//!   carrier name.

pub mod config;
pub(crate) mod convert;
pub mod error;
pub mod model;
pub mod requests;
pub mod session;
pub mod store;
pub mod stream;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, DEFAULT_BASE_URL, TlsVerification};
pub use error::{CoreError, ErrorKind};
pub use requests::{PurchaseRequest, RegisterRequest};
pub use session::SessionStore;
pub use store::{
    AdminDashboard, AdminOrders, AdminPrices, AdminSettings, AdminTransactions, AdminUsers,
    AdminWallets, Auth, Products, ShopDashboard, ShopOrders, ShopSummary, Slice, SliceError,
    SliceState, Store, Wallet,
};
pub use stream::SliceStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    BundleCategory,
    CheckoutSession,
    Currency,
    DashboardSummary,
    DataAmount,
    DataBundle,
    EntityId,
    Identified,
    Money,
    Network,
    Order,
    OrderStatus,
    PriceBook,
    PricedPackage,
    Role,
    SystemSettings,
    TopUpReceipt,
    TopUpSession,
    Transaction,
    TransactionKind,
    TransactionStats,
    TransactionStatus,
    User,
    UserStatus,
    UserWallet,
};
