//! Product type.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog with its two price lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description for listings.
    pub description: String,
    /// Display name of the category this product belongs to.
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Price per unit for retail customers.
    pub retail_price: Money,
    /// Price per unit for wholesale customers.
    pub wholesale_price: Money,
    /// Units available for sale.
    pub stock: u32,
    /// Sales unit label (e.g., "Bottle", "Bag").
    pub unit: String,
    /// Units sold so far.
    #[serde(default)]
    pub sales_count: u32,
}

impl Product {
    /// Create a new product.
    ///
    /// Returns an error if either price is negative or the two price lists
    /// use different currencies.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        retail_price: Money,
        wholesale_price: Money,
        stock: u32,
    ) -> Result<Self, CommerceError> {
        if retail_price.is_negative() || wholesale_price.is_negative() {
            return Err(CommerceError::ValidationError(
                "product prices must not be negative".to_string(),
            ));
        }
        if retail_price.currency != wholesale_price.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: retail_price.currency.code().to_string(),
                got: wholesale_price.currency.code().to_string(),
            });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            image: String::new(),
            retail_price,
            wholesale_price,
            stock,
            unit: "Unit".to_string(),
            sales_count: 0,
        })
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the category display name.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the sales unit label.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Currency shared by both price lists.
    pub fn currency(&self) -> Currency {
        self.retail_price.currency
    }

    /// Check if this product can be added to a cart.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if stock is below the given threshold.
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.stock < threshold
    }

    /// Wholesale savings per unit relative to retail, if any.
    pub fn wholesale_savings(&self) -> Option<Money> {
        self.retail_price
            .try_subtract(&self.wholesale_price)
            .filter(Money::is_positive)
    }
}
