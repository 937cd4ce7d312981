//! Inventory adjustments.

use crate::catalog::Product;
use crate::ids::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock level under which the admin dashboard flags a product for restock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 20;

/// Reason for an inventory adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentReason {
    /// Restocked from supplier.
    Restock,
    /// Manual correction.
    Correction,
    /// Damaged or lost.
    Shrinkage,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::Restock => "restock",
            AdjustmentReason::Correction => "correction",
            AdjustmentReason::Shrinkage => "shrinkage",
        }
    }
}

/// An inventory adjustment record (for audit trail).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryAdjustment {
    /// Product that was adjusted.
    pub product_id: ProductId,
    /// Stock before the adjustment.
    pub previous: u32,
    /// Stock after the adjustment.
    pub current: u32,
    /// Reason for the adjustment.
    pub reason: AdjustmentReason,
    /// When the adjustment was applied.
    pub timestamp: DateTime<Utc>,
}

impl InventoryAdjustment {
    /// Signed change actually applied.
    pub fn quantity_change(&self) -> i64 {
        i64::from(self.current) - i64::from(self.previous)
    }
}

/// Apply a signed stock delta, saturating at zero and `u32::MAX`.
pub(crate) fn apply_delta(
    product: &mut Product,
    delta: i64,
    reason: AdjustmentReason,
) -> InventoryAdjustment {
    let previous = product.stock;
    let target = i64::from(previous).saturating_add(delta).clamp(0, i64::from(u32::MAX));
    product.stock = u32::try_from(target).unwrap_or(u32::MAX);
    InventoryAdjustment {
        product_id: product.id.clone(),
        previous,
        current: product.stock,
        reason,
        timestamp: Utc::now(),
    }
}

/// Overwrite the stock level.
pub(crate) fn apply_set(product: &mut Product, stock: u32) -> InventoryAdjustment {
    let previous = product.stock;
    product.stock = stock;
    InventoryAdjustment {
        product_id: product.id.clone(),
        previous,
        current: stock,
        reason: AdjustmentReason::Correction,
        timestamp: Utc::now(),
    }
}
