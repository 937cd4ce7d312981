//! Checkout module.
//!
//! Contains the checkout workflow, orders and the order ledger.

mod flow;
mod ledger;
mod order;

pub use flow::{
    CheckoutContext, CheckoutFlow, CheckoutRequest, CheckoutState, MockSettlement, Settlement,
    SettlementReceipt, DEFAULT_SETTLEMENT_LATENCY,
};
pub use ledger::OrderLedger;
pub use order::{Order, OrderCustomer, OrderLine, OrderStatus, PaymentMethod};
