//! Order types.

use crate::cart::{cart_total, line_total, unit_price, Cart, PricingMode};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status.
///
/// Orders progress `Received -> Processing -> Shipped -> Delivered`, and
/// may be cancelled from any non-terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Received,
    /// Order being prepared.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Recebido",
            OrderStatus::Processing => "Processando",
            OrderStatus::Shipped => "Enviado",
            OrderStatus::Delivered => "Entregue",
            OrderStatus::Cancelled => "Cancelado",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The status that follows this one in normal fulfilment.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Received => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Check whether moving to `to` is a single legal step.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == OrderStatus::Cancelled || self.next() == Some(to)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the customer pays for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Instant bank transfer.
    #[default]
    Pix,
    /// Bank slip, due in 3 business days.
    Boleto,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Boleto => "boleto",
        }
    }
}

/// Who placed the order, as known at placement time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderCustomer {
    pub user_id: UserId,
    pub name: String,
    pub business_name: String,
    /// CNPJ of the business, if known.
    #[serde(default)]
    pub tax_id: Option<String>,
}

/// A line item on an order. Copied from the cart, so later catalog changes
/// do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit: String,
    /// Unit price under the order's pricing mode.
    pub unit_price: Money,
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub total: Money,
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Short order code.
    pub id: OrderId,
    pub customer: OrderCustomer,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    /// Sum of line totals.
    pub total: Money,
    pub pricing_mode: PricingMode,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    /// The only field that changes after placement.
    pub status: OrderStatus,
}

impl Order {
    /// Build a `Received` order from a snapshot of the cart.
    pub fn from_cart(
        id: OrderId,
        customer: OrderCustomer,
        cart: &Cart,
        mode: PricingMode,
        delivery_address: impl Into<String>,
        payment_method: PaymentMethod,
        placed_at: DateTime<Utc>,
    ) -> Result<Self, CommerceError> {
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                Ok(OrderLine {
                    product_id: line.product.id.clone(),
                    name: line.product.name.clone(),
                    unit: line.product.unit.clone(),
                    unit_price: unit_price(&line.product, mode),
                    quantity: line.quantity,
                    total: line_total(line, mode)?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        Ok(Self {
            id,
            customer,
            placed_at,
            lines,
            total: cart_total(cart, mode)?,
            pricing_mode: mode,
            delivery_address: delivery_address.into(),
            payment_method,
            status: OrderStatus::Received,
        })
    }

    /// Total units ordered.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Check if the order still needs work.
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}
