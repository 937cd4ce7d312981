//! The Terroa B2B storefront core.
//!
//! [`Storefront`] owns the catalog, cart, pricing mode, signed-in user,
//! order ledger and company settings, and notifies observers of every
//! change. Rendering and routing are left to the embedding application.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use terroa_storefront::prelude::*;
//!
//! # async fn run() -> Result<(), StorefrontError> {
//! let config = StorefrontConfig::default();
//! let mut store = Storefront::open(&config, Arc::new(MemoryStore::new()), demo_catalog())?;
//!
//! store.login(&Credentials::new("compras@raiz.com", "secret"))?;
//! store.add_to_cart(&ProductId::new("3"), 2)?;
//! let order = store
//!     .place_order(CheckoutRequest::new("Rua das Flores, 100", PaymentMethod::Pix))
//!     .await?;
//! assert_eq!(order.status, OrderStatus::Received);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod settings;
pub mod store;
pub mod telemetry;

pub use config::{LogConfig, LogFormat, StorageConfig, StorefrontConfig};
pub use dashboard::{customer_directory, CustomerSummary, DashboardSummary, StockLevel};
pub use error::StorefrontError;
pub use events::StoreEvent;
pub use settings::{CompanySettings, SETTINGS_KEY};
pub use store::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CompanySettings, CustomerSummary, DashboardSummary, StoreEvent, Storefront,
        StorefrontConfig, StorefrontError,
    };
    pub use terroa_auth::{Credentials, Role, User};
    pub use terroa_cache::{FileStore, KvStore, MemoryStore};
    pub use terroa_commerce::prelude::*;
}
