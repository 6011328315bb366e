//! # Pricing Engine
//!
//! Pure derivation of order totals from (unit price, quantity) pairs.
//! No I/O and no hidden state: the same lines always price the same way.
//!
//! Rules: `tax = subtotal × 10%`; shipping is a flat fee waived once the
//! subtotal reaches the free-shipping threshold; `discount` is supplied by the
//! caller (a hook for future promotions); `total = subtotal + tax + shipping −
//! discount`. All amounts are rounded to two decimal places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat tax rate applied to every order (placeholder for real
/// jurisdiction-aware computation).
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping fee below the threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Errors from pricing. Normal ranges never fail; only malformed input does.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("Invalid pricing input: {0}")]
    InvalidInput(String),
}

/// The priced breakdown of a set of lines.
///
/// Invariant: `total = subtotal + tax + shipping_cost - discount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Prices a set of `(unit_price, quantity)` pairs.
///
/// Fails with [`PricingError::InvalidInput`] on a negative unit price, a zero
/// quantity, or a negative discount.
pub fn price_lines(lines: &[(Decimal, u32)], discount: Decimal) -> Result<Quote, PricingError> {
    if discount.is_sign_negative() {
        return Err(PricingError::InvalidInput(format!(
            "negative discount: {discount}"
        )));
    }

    let mut subtotal = Decimal::ZERO;
    for &(price, quantity) in lines {
        if price.is_sign_negative() {
            return Err(PricingError::InvalidInput(format!(
                "negative unit price: {price}"
            )));
        }
        if quantity == 0 {
            return Err(PricingError::InvalidInput("zero quantity".to_string()));
        }
        subtotal += price * Decimal::from(quantity);
    }

    let subtotal = subtotal.round_dp(2);
    let tax = (subtotal * TAX_RATE).round_dp(2);
    let shipping_cost = if subtotal >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING_FEE
    };
    let total = subtotal + tax + shipping_cost - discount;

    Ok(Quote {
        subtotal,
        tax,
        shipping_cost,
        discount,
        total,
    })
}
