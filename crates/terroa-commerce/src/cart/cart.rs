//! Cart and cart line types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Currency;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A shopping cart.
///
/// Every mutation clamps line quantities to the stock of the product
/// snapshot held by the line, and a line is never stored with quantity 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Lines in insertion order, unique by product id.
    lines: Vec<CartLine>,
    /// Cart currency.
    pub currency: Currency,
}

/// A product snapshot paired with a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product as it was when last added or refreshed.
    pub product: Product,
    /// Units in the cart. Always greater than 0 and at most `product.stock`.
    pub quantity: u32,
}

impl CartLine {
    /// Product ID of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}

impl Cart {
    /// Create an empty cart in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Add units of a product, merging with an existing line.
    ///
    /// The resulting quantity is `min(existing + quantity, stock)`. Returns
    /// the quantity now in the cart for this product; 0 means no line exists
    /// (zero quantity requested on a new line, product out of stock, or
    /// product priced in another currency).
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> u32 {
        if product.currency() != self.currency {
            warn!(
                product_id = %product.id,
                product_currency = %product.currency(),
                cart_currency = %self.currency,
                "refusing product priced in another currency"
            );
            return 0;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            let wanted = line.quantity.saturating_add(quantity);
            line.product = product.clone();
            line.quantity = wanted.min(product.stock);
            let result = line.quantity;
            if result == 0 {
                self.remove_item(&product.id);
            }
            debug!(product_id = %product.id, quantity = result, "merged cart line");
            return result;
        }

        let clamped = quantity.min(product.stock);
        if clamped == 0 {
            debug!(product_id = %product.id, stock = product.stock, "nothing to add");
            return 0;
        }
        self.lines.push(CartLine {
            product: product.clone(),
            quantity: clamped,
        });
        debug!(product_id = %product.id, quantity = clamped, "added cart line");
        clamped
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of 0 or less removes the line; otherwise it is clamped to
    /// the product's stock. Unknown product ids are ignored. Returns the
    /// resulting quantity.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> u32 {
        if quantity <= 0 {
            self.remove_item(product_id);
            return 0;
        }
        let Some(line) = self.lines.iter_mut().find(|l| &l.product.id == product_id) else {
            return 0;
        };
        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        line.quantity = requested.min(line.product.stock);
        let result = line.quantity;
        if result == 0 {
            self.remove_item(product_id);
        }
        result
    }

    /// Remove a line. Removing a product that is not in the cart is a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product.id != product_id);
        self.lines.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Replace the product snapshot of a line after an inventory change,
    /// clamping the quantity to the new stock.
    ///
    /// Returns `true` if the cart changed.
    pub fn refresh_product(&mut self, product: &Product) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) else {
            return false;
        };
        let before = line.quantity;
        line.product = product.clone();
        line.quantity = before.min(product.stock);
        if line.quantity == 0 {
            self.remove_item(&product.id);
            return true;
        }
        line.quantity != before
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line for a product.
    pub fn get_line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{cart_total, PricingMode};
    use crate::money::Money;

    fn product(id: &str, stock: u32) -> Product {
        Product::new(
            id,
            format!("Product {id}"),
            Money::new(1290, Currency::BRL),
            Money::new(990, Currency::BRL),
            stock,
        )
        .unwrap()
    }

    #[test]
    fn test_add_clamps_to_stock() {
        let mut cart = Cart::default();
        assert_eq!(cart.add_item(&product("1", 50), 999), 50);
        assert_eq!(cart.get_line(&ProductId::new("1")).unwrap().quantity, 50);
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::default();
        let p = product("1", 10);
        cart.add_item(&p, 3);
        cart.add_item(&p, 4);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 7);

        // Merge is clamped too.
        assert_eq!(cart.add_item(&p, 100), 10);
        assert_eq!(cart.item_count(), 10);
    }

    #[test]
    fn test_add_out_of_stock_or_zero_creates_no_line() {
        let mut cart = Cart::default();
        assert_eq!(cart.add_item(&product("1", 0), 5), 0);
        assert_eq!(cart.add_item(&product("2", 5), 0), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_other_currency() {
        let mut cart = Cart::default();
        let euro = Product::new(
            "eu",
            "Azeite Importado",
            Money::new(2000, Currency::EUR),
            Money::new(1500, Currency::EUR),
            10,
        )
        .unwrap();

        assert_eq!(cart.add_item(&product("1", 10), 1), 1);
        assert_eq!(cart.add_item(&euro, 3), 0);
        assert_eq!(cart.unique_item_count(), 1);
        assert!(cart_total(&cart, PricingMode::Retail).is_ok());
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = Cart::default();
        cart.add_item(&product("1", 10), 2);
        cart.add_item(&product("2", 10), 2);

        cart.update_quantity(&ProductId::new("1"), 0);
        cart.update_quantity(&ProductId::new("2"), -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_clamps_to_stock() {
        let mut cart = Cart::default();
        cart.add_item(&product("1", 10), 2);
        assert_eq!(cart.update_quantity(&ProductId::new("1"), 25), 10);
        assert_eq!(cart.update_quantity(&ProductId::new("1"), 4), 4);
    }

    #[test]
    fn test_update_unknown_is_ignored() {
        let mut cart = Cart::default();
        cart.add_item(&product("1", 10), 2);
        assert_eq!(cart.update_quantity(&ProductId::new("9"), 3), 0);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::default();
        cart.add_item(&product("1", 10), 2);
        let before = cart.clone();
        assert!(!cart.remove_item(&ProductId::new("404")));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::default();
        cart.add_item(&product("1", 10), 2);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_refresh_product_reclamps() {
        let mut cart = Cart::default();
        cart.add_item(&product("1", 10), 8);

        assert!(cart.refresh_product(&product("1", 5)));
        assert_eq!(cart.get_line(&ProductId::new("1")).unwrap().quantity, 5);

        assert!(cart.refresh_product(&product("1", 0)));
        assert!(cart.is_empty());

        assert!(!cart.refresh_product(&product("2", 3)));
    }
}
