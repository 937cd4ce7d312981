//! Change notifications for storefront observers.

use serde::Serialize;
use terroa_auth::Role;
use terroa_commerce::cart::PricingMode;
use terroa_commerce::catalog::InventoryAdjustment;
use terroa_commerce::checkout::OrderStatus;
use terroa_commerce::ids::{OrderId, UserId};
use terroa_commerce::Money;

/// Something observable changed in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    CartChanged {
        item_count: u64,
    },
    PricingModeChanged {
        mode: PricingMode,
    },
    /// Someone signed in (`user_id` set) or out (`None`).
    SessionChanged {
        user_id: Option<UserId>,
        role: Option<Role>,
    },
    OrderPlaced {
        order_id: OrderId,
        total: Money,
    },
    OrderStatusChanged {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
    StockChanged {
        adjustment: InventoryAdjustment,
    },
    SettingsChanged,
}

impl StoreEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::CartChanged { .. } => "cart_changed",
            StoreEvent::PricingModeChanged { .. } => "pricing_mode_changed",
            StoreEvent::SessionChanged { .. } => "session_changed",
            StoreEvent::OrderPlaced { .. } => "order_placed",
            StoreEvent::OrderStatusChanged { .. } => "order_status_changed",
            StoreEvent::StockChanged { .. } => "stock_changed",
            StoreEvent::SettingsChanged => "settings_changed",
        }
    }
}
