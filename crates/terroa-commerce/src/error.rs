//! Commerce error types.

use thiserror::Error;

use crate::checkout::OrderStatus;

/// Errors that can occur in catalog, cart, checkout and ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Amount cannot be represented in the currency's minor unit.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout was submitted without a delivery address.
    #[error("Delivery address is required")]
    MissingDeliveryAddress,

    /// Checkout was attempted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout was attempted without an authenticated customer.
    #[error("Checkout requires an authenticated customer")]
    NotAuthenticated,

    /// Wholesale order below the minimum order amount.
    #[error("Wholesale orders require at least {required}, cart total is {total}")]
    BelowWholesaleMinimum { required: String, total: String },

    /// A settlement is already in flight.
    #[error("A checkout is already being settled")]
    SettlementInFlight,

    /// The settlement provider rejected the payment.
    #[error("Settlement failed: {0}")]
    SettlementFailed(String),

    /// Order status change not allowed by the status progression.
    #[error("Invalid order status transition from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CommerceError {
    /// User-facing validation failure; recoverable without state change.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::MissingDeliveryAddress
                | CommerceError::InvalidAmount(_)
                | CommerceError::ValidationError(_)
        )
    }

    /// Routing-level guard: the operation should not have been invoked in
    /// the current state.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CommerceError::EmptyCart
                | CommerceError::NotAuthenticated
                | CommerceError::BelowWholesaleMinimum { .. }
                | CommerceError::SettlementInFlight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(CommerceError::MissingDeliveryAddress.is_validation());
        assert!(!CommerceError::MissingDeliveryAddress.is_precondition());
        assert!(CommerceError::EmptyCart.is_precondition());
        assert!(CommerceError::NotAuthenticated.is_precondition());
        assert!(!CommerceError::Overflow.is_validation());
        assert!(!CommerceError::Overflow.is_precondition());
    }

    #[test]
    fn test_transition_message() {
        let err = CommerceError::InvalidStatusTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Processing,
        };
        assert_eq!(
            err.to_string(),
            "Invalid order status transition from delivered to processing"
        );
    }
}
