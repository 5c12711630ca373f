// besthub-api: async client for the Besthub data-bundle backend (auth, shop, admin)

mod admin;
mod auth;
pub mod client;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod models;
mod shop;
pub mod transport;

pub use auth::AuthOutcome;
pub use client::ApiClient;
pub use endpoint::{Endpoint, Namespace};
pub use envelope::Envelope;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
