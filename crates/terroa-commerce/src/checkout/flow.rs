//! Checkout workflow state machine.
//!
//! A submission walks `Idle -> Validating -> Settling -> Completed -> Idle`.
//! A rejected delivery address or a failed settlement walks
//! `Validating -> Failed -> Idle` (or `Settling -> Failed -> Idle`) and leaves
//! the cart and ledger untouched. Precondition failures are reported before
//! the workflow leaves `Idle`.
//!
//! [`CheckoutFlow::submit`] takes `&mut self` for the whole settlement, so a
//! second submission cannot start while one is in flight. If the submission
//! future is dropped mid-settlement the workflow returns to `Idle`.

use crate::cart::{cart_total, Cart, PricingMode, WholesaleMinimum};
use crate::checkout::{Order, OrderCustomer, OrderLedger, PaymentMethod};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Money;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Default simulated settlement latency.
pub const DEFAULT_SETTLEMENT_LATENCY: Duration = Duration::from_millis(2000);

const TRANSITION_CHANNEL_CAPACITY: usize = 32;

/// States of the checkout workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    Settling,
    Completed,
    Failed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Validating => "validating",
            CheckoutState::Settling => "settling",
            CheckoutState::Completed => "completed",
            CheckoutState::Failed => "failed",
        }
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the customer filled in on the checkout page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CheckoutRequest {
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutRequest {
    pub fn new(delivery_address: impl Into<String>, payment_method: PaymentMethod) -> Self {
        Self {
            delivery_address: delivery_address.into(),
            payment_method,
        }
    }
}

/// Proof that an order was paid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementReceipt {
    pub reference: String,
    pub settled_at: DateTime<Utc>,
}

/// Payment settlement provider.
#[async_trait]
pub trait Settlement: Send + Sync {
    /// Settle the amount due for an order.
    async fn settle(
        &self,
        order_id: &OrderId,
        amount: &Money,
        method: PaymentMethod,
    ) -> Result<SettlementReceipt, CommerceError>;
}

/// Settlement that waits a fixed latency and always succeeds.
#[derive(Debug, Clone)]
pub struct MockSettlement {
    latency: Duration,
}

impl MockSettlement {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockSettlement {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLEMENT_LATENCY)
    }
}

#[async_trait]
impl Settlement for MockSettlement {
    async fn settle(
        &self,
        order_id: &OrderId,
        amount: &Money,
        method: PaymentMethod,
    ) -> Result<SettlementReceipt, CommerceError> {
        debug!(
            %order_id,
            %amount,
            method = method.as_str(),
            latency_ms = self.latency.as_millis() as u64,
            "simulating settlement"
        );
        tokio::time::sleep(self.latency).await;
        Ok(SettlementReceipt {
            reference: format!("MOCK-{order_id}"),
            settled_at: Utc::now(),
        })
    }
}

/// Mutable storefront state a submission works on.
pub struct CheckoutContext<'a> {
    pub cart: &'a mut Cart,
    pub ledger: &'a mut OrderLedger,
    /// `None` when nobody is signed in.
    pub customer: Option<OrderCustomer>,
    pub mode: PricingMode,
    pub minimum: WholesaleMinimum,
}

/// The checkout workflow.
pub struct CheckoutFlow {
    state: CheckoutState,
    settlement: Arc<dyn Settlement>,
    transitions: broadcast::Sender<CheckoutState>,
}

impl CheckoutFlow {
    pub fn new(settlement: Arc<dyn Settlement>) -> Self {
        let (transitions, _) = broadcast::channel(TRANSITION_CHANNEL_CAPACITY);
        Self {
            state: CheckoutState::Idle,
            settlement,
            transitions,
        }
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Receive every state the workflow enters from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CheckoutState> {
        self.transitions.subscribe()
    }

    /// Check the entry preconditions without changing state. Returns the
    /// amount that would be charged.
    pub fn check_preconditions(
        &self,
        cart: &Cart,
        signed_in: bool,
        mode: PricingMode,
        minimum: &WholesaleMinimum,
    ) -> Result<Money, CommerceError> {
        if self.state != CheckoutState::Idle {
            return Err(CommerceError::SettlementInFlight);
        }
        if !signed_in {
            return Err(CommerceError::NotAuthenticated);
        }
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        let total = cart_total(cart, mode)?;
        minimum.check(&total, mode)?;
        Ok(total)
    }

    /// Validate, settle and record an order for the current cart.
    ///
    /// On success the order is in the ledger with status `Received` and the
    /// cart is empty.
    pub async fn submit(
        &mut self,
        ctx: CheckoutContext<'_>,
        request: CheckoutRequest,
    ) -> Result<Order, CommerceError> {
        let CheckoutContext {
            cart,
            ledger,
            customer,
            mode,
            minimum,
        } = ctx;
        let total = self.check_preconditions(cart, customer.is_some(), mode, &minimum)?;
        let customer = customer.ok_or(CommerceError::NotAuthenticated)?;

        let settlement = Arc::clone(&self.settlement);
        let mut guard = StateGuard {
            state: &mut self.state,
            transitions: &self.transitions,
        };

        guard.enter(CheckoutState::Validating);
        let address = request.delivery_address.trim();
        if address.is_empty() {
            warn!("checkout rejected: missing delivery address");
            guard.enter(CheckoutState::Failed);
            guard.enter(CheckoutState::Idle);
            return Err(CommerceError::MissingDeliveryAddress);
        }

        let order_id = ledger.next_order_id(&mut rand::thread_rng());
        let order = Order::from_cart(
            order_id,
            customer,
            cart,
            mode,
            address,
            request.payment_method,
            Utc::now(),
        )?;

        guard.enter(CheckoutState::Settling);
        let receipt = match settlement
            .settle(&order.id, &total, request.payment_method)
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "settlement failed");
                guard.enter(CheckoutState::Failed);
                guard.enter(CheckoutState::Idle);
                return Err(e);
            }
        };

        guard.enter(CheckoutState::Completed);
        info!(
            order_id = %order.id,
            total = %order.total,
            mode = %mode,
            reference = %receipt.reference,
            "order placed"
        );
        ledger.append(order.clone());
        cart.clear();
        guard.enter(CheckoutState::Idle);
        Ok(order)
    }
}

impl fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Broadcasts transitions and puts the workflow back to `Idle` if a
/// submission is dropped part way.
struct StateGuard<'a> {
    state: &'a mut CheckoutState,
    transitions: &'a broadcast::Sender<CheckoutState>,
}

impl StateGuard<'_> {
    fn enter(&mut self, next: CheckoutState) {
        debug!(from = %self.state, to = %next, "checkout transition");
        *self.state = next;
        // No subscribers is fine.
        let _ = self.transitions.send(next);
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if *self.state != CheckoutState::Idle {
            warn!(state = %self.state, "checkout abandoned, resetting");
            self.enter(CheckoutState::Idle);
        }
    }
}
