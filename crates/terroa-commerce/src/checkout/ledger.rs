//! In-memory order ledger.

use crate::checkout::{Order, OrderStatus};
use crate::error::CommerceError;
use crate::ids::{OrderId, UserId};
use crate::money::{Currency, Money};
use rand::Rng;
use tracing::info;

/// Append-only list of placed orders, newest first.
///
/// Only an order's status can change after it is appended.
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an order at the front of the ledger.
    pub fn append(&mut self, order: Order) {
        info!(order_id = %order.id, total = %order.total, "order recorded");
        self.orders.insert(0, order);
    }

    /// Generate an order code that no order in the ledger uses yet.
    pub fn next_order_id<R: Rng + ?Sized>(&self, rng: &mut R) -> OrderId {
        loop {
            let id = OrderId::generate_code(rng);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders placed by a user, newest first.
    pub fn for_user(&self, user_id: &UserId) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| &o.customer.user_id == user_id)
            .collect()
    }

    /// Every order, newest first.
    pub fn all(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Move an order to a new status.
    ///
    /// Setting the current status again succeeds without change. Returns the
    /// previous status.
    pub fn update_status(
        &mut self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, CommerceError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))?;

        let from = order.status;
        if from == status {
            return Ok(from);
        }
        if !from.can_transition_to(status) {
            return Err(CommerceError::InvalidStatusTransition { from, to: status });
        }
        order.status = status;
        info!(order_id = %id, %from, to = %status, "order status updated");
        Ok(from)
    }

    /// Orders that are neither delivered nor cancelled.
    pub fn open_orders(&self) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.is_open()).collect()
    }

    /// Sum of all order totals in the given currency, cancelled orders
    /// excluded.
    pub fn revenue(&self, currency: Currency) -> Result<Money, CommerceError> {
        self.orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .try_fold(Money::zero(currency), |acc, o| acc.checked_add(&o.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PricingMode;
    use crate::checkout::{OrderCustomer, PaymentMethod};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn order(id: &str, user: &str, cents: i64) -> Order {
        Order {
            id: OrderId::new(id),
            customer: OrderCustomer {
                user_id: UserId::new(user),
                name: "Cliente".to_string(),
                business_name: "Empresa".to_string(),
                tax_id: None,
            },
            placed_at: Utc::now(),
            lines: vec![],
            total: Money::new(cents, Currency::BRL),
            pricing_mode: PricingMode::Retail,
            delivery_address: "Rua A, 1".to_string(),
            payment_method: PaymentMethod::Pix,
            status: OrderStatus::Received,
        }
    }

    #[test]
    fn test_append_newest_first() {
        let mut ledger = OrderLedger::new();
        ledger.append(order("AAAAAA", "u1", 100));
        ledger.append(order("BBBBBB", "u2", 200));

        let ids: Vec<&str> = ledger.all().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["BBBBBB", "AAAAAA"]);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_for_user() {
        let mut ledger = OrderLedger::new();
        ledger.append(order("AAAAAA", "u1", 100));
        ledger.append(order("BBBBBB", "u2", 200));
        ledger.append(order("CCCCCC", "u1", 300));

        let ids: Vec<&str> = ledger
            .for_user(&UserId::new("u1"))
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["CCCCCC", "AAAAAA"]);
    }

    #[test]
    fn test_update_status_progression() {
        let mut ledger = OrderLedger::new();
        ledger.append(order("AAAAAA", "u1", 100));
        let id = OrderId::new("AAAAAA");

        ledger.update_status(&id, OrderStatus::Processing).unwrap();
        ledger.update_status(&id, OrderStatus::Shipped).unwrap();
        ledger.update_status(&id, OrderStatus::Delivered).unwrap();
        assert_eq!(ledger.get(&id).unwrap().status, OrderStatus::Delivered);

        let err = ledger
            .update_status(&id, OrderStatus::Processing)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid order status transition from delivered to processing"
        );
    }

    #[test]
    fn test_update_status_rejects_skips() {
        let mut ledger = OrderLedger::new();
        ledger.append(order("AAAAAA", "u1", 100));
        let id = OrderId::new("AAAAAA");

        assert!(ledger.update_status(&id, OrderStatus::Delivered).is_err());
        assert_eq!(ledger.get(&id).unwrap().status, OrderStatus::Received);
    }

    #[test]
    fn test_same_status_is_noop() {
        let mut ledger = OrderLedger::new();
        ledger.append(order("AAAAAA", "u1", 100));
        let id = OrderId::new("AAAAAA");
        assert_eq!(
            ledger.update_status(&id, OrderStatus::Received).unwrap(),
            OrderStatus::Received
        );
    }

    #[test]
    fn test_cancel_and_unknown() {
        let mut ledger = OrderLedger::new();
        ledger.append(order("AAAAAA", "u1", 100));
        let id = OrderId::new("AAAAAA");
        ledger.update_status(&id, OrderStatus::Cancelled).unwrap();
        assert!(ledger.update_status(&id, OrderStatus::Processing).is_err());

        let err = ledger
            .update_status(&OrderId::new("ZZZZZZ"), OrderStatus::Processing)
            .unwrap_err();
        assert_eq!(err, CommerceError::OrderNotFound("ZZZZZZ".to_string()));
    }

    #[test]
    fn test_revenue_and_open_orders() {
        let mut ledger = OrderLedger::new();
        ledger.append(order("AAAAAA", "u1", 1000));
        ledger.append(order("BBBBBB", "u1", 2500));
        ledger.append(order("CCCCCC", "u1", 700));
        ledger
            .update_status(&OrderId::new("CCCCCC"), OrderStatus::Cancelled)
            .unwrap();

        assert_eq!(
            ledger.revenue(Currency::BRL).unwrap(),
            Money::new(3500, Currency::BRL)
        );
        assert_eq!(ledger.open_orders().len(), 2);
    }

    #[test]
    fn test_next_order_id_avoids_collisions() {
        let mut ledger = OrderLedger::new();
        let taken = OrderId::generate_code(&mut StdRng::seed_from_u64(7));
        ledger.append(order(taken.as_str(), "u1", 100));

        let id = ledger.next_order_id(&mut StdRng::seed_from_u64(7));
        assert_ne!(id, taken);
        assert_eq!(id.as_str().len(), OrderId::CODE_LEN);
    }
}
