//! Commerce domain types and logic for the Terroa B2B storefront.
//!
//! - **Catalog**: Products with retail and wholesale price lists, categories, inventory
//! - **Cart**: Stock-clamped cart lines and exact dual price-list pricing
//! - **Checkout**: Async checkout workflow, orders, order ledger
//! - **Search**: Catalog filters and sorting
//!
//! # Example
//!
//! ```rust
//! use terroa_commerce::prelude::*;
//!
//! let catalog = demo_catalog();
//! let product = catalog.get(&ProductId::new("4")).unwrap();
//!
//! let mut cart = Cart::default();
//! cart.add_item(product, 3);
//!
//! let total = cart_total(&cart, PricingMode::Wholesale).unwrap();
//! assert_eq!(total.display(), "R$26.70");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        demo_catalog, AdjustmentReason, CatalogProvider, Category, InventoryAdjustment, Product,
        StaticCatalog,
    };

    // Cart
    pub use crate::cart::{
        cart_total, line_total, unit_price, Cart, CartLine, CartPricing, LinePricing, PricingMode,
        WholesaleMinimum,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutContext, CheckoutFlow, CheckoutRequest, CheckoutState, MockSettlement, Order,
        OrderCustomer, OrderLedger, OrderLine, OrderStatus, PaymentMethod, Settlement,
    };

    // Search
    pub use crate::search::{CatalogQuery, Filter, SortOption};
}
