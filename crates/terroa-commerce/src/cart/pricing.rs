//! Cart pricing calculations.
//!
//! All totals are exact: prices are integer minor units and every
//! multiplication and sum is checked.

use crate::cart::{Cart, CartLine};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which price list applies to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    #[default]
    Retail,
    Wholesale,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Retail => "retail",
            PricingMode::Wholesale => "wholesale",
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit price of a product under a price list.
pub fn unit_price(product: &Product, mode: PricingMode) -> Money {
    match mode {
        PricingMode::Retail => product.retail_price,
        PricingMode::Wholesale => product.wholesale_price,
    }
}

/// `unit_price * quantity` for one line.
pub fn line_total(line: &CartLine, mode: PricingMode) -> Result<Money, CommerceError> {
    unit_price(&line.product, mode)
        .try_multiply(i64::from(line.quantity))
        .ok_or(CommerceError::Overflow)
}

/// Sum of all line totals. An empty cart totals zero.
pub fn cart_total(cart: &Cart, mode: PricingMode) -> Result<Money, CommerceError> {
    cart.lines().iter().try_fold(Money::zero(cart.currency), |acc, line| {
        acc.checked_add(&line_total(line, mode)?)
    })
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub product_id: ProductId,
    pub unit_price: Money,
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub total: Money,
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Price list the breakdown was computed under.
    pub mode: PricingMode,
    /// Per-line pricing, in cart order.
    pub lines: Vec<LinePricing>,
    /// Total units.
    pub item_count: u64,
    /// Sum of line totals.
    pub subtotal: Money,
}

impl CartPricing {
    /// Price every line of a cart.
    pub fn calculate(cart: &Cart, mode: PricingMode) -> Result<Self, CommerceError> {
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                Ok(LinePricing {
                    product_id: line.product.id.clone(),
                    unit_price: unit_price(&line.product, mode),
                    quantity: line.quantity,
                    total: line_total(line, mode)?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;
        let subtotal = Money::try_sum(lines.iter().map(|l| &l.total), cart.currency)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            mode,
            lines,
            item_count: cart.item_count(),
            subtotal,
        })
    }
}

/// Minimum order value for wholesale checkouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WholesaleMinimum {
    pub amount: Money,
}

impl Default for WholesaleMinimum {
    fn default() -> Self {
        Self::new(Money::new(50000, Currency::BRL))
    }
}

impl WholesaleMinimum {
    pub fn new(amount: Money) -> Self {
        Self { amount }
    }

    /// Check a cart total against the minimum. Retail totals always pass;
    /// wholesale totals pass when they reach the minimum (inclusive).
    pub fn check(&self, total: &Money, mode: PricingMode) -> Result<(), CommerceError> {
        if mode == PricingMode::Retail || total.amount_cents >= self.amount.amount_cents {
            return Ok(());
        }
        Err(CommerceError::BelowWholesaleMinimum {
            required: self.amount.display(),
            total: total.display(),
        })
    }

    /// Amount still missing to reach the minimum, or `None` if satisfied.
    pub fn shortfall(&self, total: &Money, mode: PricingMode) -> Option<Money> {
        if self.check(total, mode).is_ok() {
            return None;
        }
        self.amount.try_subtract(total)
    }
}
