//! Product catalog module.
//!
//! Contains the product and category types, the catalog provider seam, and
//! admin inventory adjustments.

mod category;
mod demo;
mod inventory;
mod product;

pub use category::Category;
pub use demo::demo_catalog;
pub use inventory::{AdjustmentReason, InventoryAdjustment, DEFAULT_LOW_STOCK_THRESHOLD};
pub use product::Product;

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::CatalogQuery;

/// Source of the product catalog.
///
/// The storefront only reads from the catalog, except for the admin
/// inventory operations, which go through [`CatalogProvider::product_mut`].
pub trait CatalogProvider: Send + Sync {
    /// All products, in display order.
    fn list_products(&self) -> &[Product];

    /// Category names, in display order.
    fn list_categories(&self) -> Vec<String>;

    /// Mutable access to a product for inventory management.
    fn product_mut(&mut self, id: &ProductId) -> Option<&mut Product>;

    /// Look up a product by id.
    fn get(&self, id: &ProductId) -> Option<&Product> {
        self.list_products().iter().find(|p| &p.id == id)
    }

    /// Products matching a catalog query.
    fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        query.apply(self.list_products())
    }

    /// Overwrite a product's stock level.
    fn set_stock(
        &mut self,
        id: &ProductId,
        stock: u32,
    ) -> Result<InventoryAdjustment, CommerceError> {
        let product = self
            .product_mut(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        Ok(inventory::apply_set(product, stock))
    }

    /// Apply a signed stock change, saturating at zero.
    fn adjust_stock(
        &mut self,
        id: &ProductId,
        delta: i64,
        reason: AdjustmentReason,
    ) -> Result<InventoryAdjustment, CommerceError> {
        let product = self
            .product_mut(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        Ok(inventory::apply_delta(product, delta, reason))
    }

    /// Count units sold towards a product's best-selling rank. Unknown
    /// products are ignored.
    fn record_sale(&mut self, id: &ProductId, quantity: u32) {
        if let Some(product) = self.product_mut(id) {
            product.sales_count = product.sales_count.saturating_add(quantity);
        }
    }

    /// Products whose stock is below the threshold.
    fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.list_products()
            .iter()
            .filter(|p| p.is_low_stock(threshold))
            .collect()
    }

    /// The `n` products with the highest stock.
    fn top_by_stock(&self, n: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.list_products().iter().collect();
        products.sort_by(|a, b| b.stock.cmp(&a.stock));
        products.truncate(n);
        products
    }
}

/// An in-memory catalog built from a fixed product list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl StaticCatalog {
    /// Create a catalog from products and an explicit category list.
    ///
    /// Categories referenced by products but missing from the list are
    /// appended in product order.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        let mut catalog = Self {
            products,
            categories,
        };
        let missing: Vec<String> = catalog
            .products
            .iter()
            .map(|p| p.category.clone())
            .filter(|name| !name.is_empty())
            .collect();
        for name in missing {
            if !catalog.categories.iter().any(|c| c.name == name) {
                catalog.categories.push(Category::new(name));
            }
        }
        catalog
    }

    /// Category records, including slugs.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_products(&self) -> &[Product] {
        &self.products
    }

    fn list_categories(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    fn product_mut(&mut self, id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| &p.id == id)
    }
}
