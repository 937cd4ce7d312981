//! Catalog filter types.

use crate::cart::{unit_price, PricingMode};
use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A catalog filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Filter by category name or slug.
    Category(String),
    /// Filter by unit price under the given price list.
    PriceRange {
        mode: PricingMode,
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only show in-stock items.
    InStock,
    /// Case-insensitive substring search in the product name.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Create a price range filter.
    pub fn price_range(mode: PricingMode, min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { mode, min, max }
    }

    /// Create an in-stock filter.
    pub fn in_stock() -> Self {
        Filter::InStock
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(name) => {
                crate::catalog::Category::new(product.category.as_str()).matches(name)
            }
            Filter::PriceRange { mode, min, max } => {
                let price = unit_price(product, *mode);
                let above_min = min.map_or(true, |min| price.amount_cents >= min.amount_cents);
                let below_max = max.map_or(true, |max| price.amount_cents <= max.amount_cents);
                above_min && below_max
            }
            Filter::InStock => product.is_in_stock(),
            Filter::Text(query) => product
                .name
                .to_lowercase()
                .contains(&query.to_lowercase()),
        }
    }
}
