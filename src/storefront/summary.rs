//! Cart totals
//!
//! Recomputed from item prices on every cart view; never persisted.

use crate::storage::CartItem;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Subtotal, tax and total for a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartSummary {
    /// Sum item prices and apply `tax_rate`, rounding tax to cents
    ///
    /// Amounts are summed as-is; the currency of each price is not compared.
    pub fn compute(cart: &[CartItem], tax_rate: Decimal) -> Self {
        let subtotal: Decimal = cart.iter().map(|item| item.price.amount()).sum();
        let tax = (subtotal * tax_rate)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}
