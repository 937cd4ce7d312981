//! Shopping cart module.
//!
//! Contains the cart, its lines, and the dual price-list pricing engine.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine};
pub use pricing::{
    cart_total, line_total, unit_price, CartPricing, LinePricing, PricingMode, WholesaleMinimum,
};
