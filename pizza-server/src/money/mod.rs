//! Money calculation utilities using rust_decimal for precision
//!
//! All pricing arithmetic is done using `Decimal` internally, then converted
//! to `f64` (2 decimal places, half-up) for storage and serialization.
//!
//! Pricing model:
//!
//! - unit price = base price × size multiplier + Σ extra prices
//! - line total = unit price × quantity
//! - tax = subtotal × 8%
//! - total = subtotal + delivery fee + tax
//!
//! The size and extras catalogs are fixed menus, not database records.

use rust_decimal::prelude::*;

use crate::utils::{AppError, AppResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Sales tax rate (8%)
const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Default delivery fee a new area starts with (3.99)
pub const STANDARD_DELIVERY_FEE: f64 = 3.99;

/// Maximum allowed price ($1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Size tiers: label → base price multiplier
pub const SIZES: &[(&str, Decimal)] = &[
    ("Small", Decimal::from_parts(8, 0, 0, false, 1)),
    ("Medium", Decimal::ONE),
    ("Large", Decimal::from_parts(13, 0, 0, false, 1)),
    ("Extra Large", Decimal::from_parts(16, 0, 0, false, 1)),
];

/// Paid toppings: label → fixed price
pub const EXTRAS: &[(&str, Decimal)] = &[
    ("Extra Cheese", Decimal::from_parts(299, 0, 0, false, 2)),
    ("Pepperoni", Decimal::from_parts(349, 0, 0, false, 2)),
    ("Mushrooms", Decimal::from_parts(249, 0, 0, false, 2)),
    ("Bell Peppers", Decimal::from_parts(249, 0, 0, false, 2)),
    ("Olives", Decimal::from_parts(299, 0, 0, false, 2)),
    ("Onions", Decimal::from_parts(199, 0, 0, false, 2)),
    ("Jalapeños", Decimal::from_parts(249, 0, 0, false, 2)),
    ("Bacon", Decimal::from_parts(399, 0, 0, false, 2)),
];

/// Look up the multiplier for a size label
pub fn size_multiplier(label: &str) -> Option<Decimal> {
    SIZES.iter().find(|(name, _)| *name == label).map(|(_, m)| *m)
}

/// Look up the price of an extra by label
pub fn extra_price(label: &str) -> Option<Decimal> {
    EXTRAS.iter().find(|(name, _)| *name == label).map(|(_, p)| *p)
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `validate_price()` at the boundary.
/// If NaN/Infinity somehow reaches here, logs an error and returns ZERO
/// to avoid silent data corruption in price calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with max input ≤ 1_000_000 (validated at boundary)
        // is always within f64 representable range
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Round a Decimal to monetary precision (2dp, half-up)
#[inline]
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate that a price is finite and within [0, MAX_PRICE]
pub fn validate_price(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_PRICE {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"
        )));
    }
    Ok(())
}

/// Validate that a quantity is within [1, MAX_QUANTITY]
pub fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

/// Calculate the per-unit price for a sized pizza with extras
///
/// Formula: base_price × size multiplier + Σ extra prices
///
/// Unknown size or extra labels are validation failures — the server
/// prices every line itself and never trusts a client-supplied price.
pub fn unit_price(base_price: f64, size: &str, extras: &[String]) -> AppResult<Decimal> {
    validate_price(base_price, "price")?;

    let multiplier = size_multiplier(size)
        .ok_or_else(|| AppError::validation(format!("Unknown size: {size}")))?;

    let mut price = to_decimal(base_price) * multiplier;
    for extra in extras {
        price += extra_price(extra)
            .ok_or_else(|| AppError::validation(format!("Unknown extra: {extra}")))?;
    }

    Ok(round_money(price.max(Decimal::ZERO)))
}

/// Line total = unit price × quantity
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Order-level totals, computed once at checkout and persisted verbatim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub tax: f64,
    pub total: f64,
}

/// Compute order totals from a subtotal and the area's delivery fee
///
/// tax = round2(subtotal × 8%), total = round2(subtotal + fee + tax)
pub fn order_totals(subtotal: Decimal, delivery_fee: f64) -> OrderTotals {
    let fee = to_decimal(delivery_fee);
    let tax = round_money(subtotal * TAX_RATE);
    let total = round_money(subtotal + fee + tax);

    OrderTotals {
        subtotal: to_f64(subtotal),
        delivery_fee: to_f64(fee),
        tax: to_f64(tax),
        total: to_f64(total),
    }
}
