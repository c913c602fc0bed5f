//! Hook point for discounts applied to an order's subtotal.
//!
//! Only the pass-through policy exists today; the trait is where a real
//! discount engine would plug in.

use std::fmt::Debug;

/// Adjusts an order's subtotal into the amount the customer pays.
pub trait DiscountPolicy: Debug + Send + Sync {
    fn apply(&self, subtotal: f64) -> f64;
}

/// Leaves the subtotal untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiscount;

impl DiscountPolicy for NoDiscount {
    fn apply(&self, subtotal: f64) -> f64 {
        subtotal
    }
}
