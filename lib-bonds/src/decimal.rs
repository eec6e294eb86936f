//! Decimal arithmetic substrate
//!
//! Thin layer over `rust_decimal` fixing the engine's precision and the
//! rounding rules every evaluator must share.
//!
//! # Rules (enforced in code)
//!
//! - Results leave the engine with at most `DEC_PRECISION` fractional digits
//! - Prices, integrals and returns are truncated; fees are rounded up
//! - Overflow is an error, never a wrap or a panic
//! - Floats only appear in the Augmented bridge (`to_f64` / `from_f64_rounded`)

use rust_decimal::prelude::{MathematicalOps, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::errors::{BondError, BondResult};

/// Fractional digits carried by every amount the engine returns
pub const DEC_PRECISION: u32 = 18;

/// Fractional digits kept when converting Augmented float results back
pub const FLOAT_PRECISION: usize = 6;

/// Truncate to the engine precision
pub fn quantize(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(DEC_PRECISION, RoundingStrategy::ToZero)
        .normalize()
}

/// Round up to the engine precision (smallest representable unit at or above `value`)
pub fn quantize_up(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(DEC_PRECISION, RoundingStrategy::ToPositiveInfinity)
        .normalize()
}

/// Round up to a whole unit
pub fn ceil_units(value: Decimal) -> Decimal {
    value.ceil()
}

/// Round down to a whole unit
pub fn truncate_units(value: Decimal) -> Decimal {
    value.trunc()
}

/// True if `value` has no fractional part
pub fn is_integer(value: Decimal) -> bool {
    value.trunc() == value
}

pub fn add(a: Decimal, b: Decimal) -> BondResult<Decimal> {
    a.checked_add(b).ok_or_else(|| BondError::overflow("add"))
}

pub fn sub(a: Decimal, b: Decimal) -> BondResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| BondError::overflow("sub"))
}

pub fn mul(a: Decimal, b: Decimal) -> BondResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| BondError::overflow("mul"))
}

/// Division; a zero divisor is reported as overflow
pub fn quo(a: Decimal, b: Decimal) -> BondResult<Decimal> {
    a.checked_div(b).ok_or_else(|| BondError::overflow("quo"))
}

/// `x^n` for a non-negative integer exponent
pub fn power(x: Decimal, n: u64) -> BondResult<Decimal> {
    x.checked_powu(n).ok_or_else(|| BondError::overflow("power"))
}

/// Approximate square root; `None` from the substrate means a negative radicand
pub fn approx_sqrt(x: Decimal) -> BondResult<Decimal> {
    x.sqrt()
        .ok_or_else(|| BondError::NegativeArgument(format!("sqrt of {}", x)))
}

/// Truncate a non-negative integral decimal to a `u64` exponent
pub fn truncate_to_u64(x: Decimal, name: &str) -> BondResult<u64> {
    x.trunc()
        .to_u64()
        .ok_or_else(|| BondError::ArithmeticOverflow(format!("{} does not fit in u64", name)))
}

/// Bridge into floating point (Augmented family only)
pub fn to_f64(x: Decimal) -> BondResult<f64> {
    x.to_f64()
        .ok_or_else(|| BondError::ArithmeticOverflow(format!("{} has no f64 form", x)))
}

/// Bridge back from floating point, keeping `FLOAT_PRECISION` fractional digits
pub fn from_f64_rounded(x: f64, operation: &str) -> BondResult<Decimal> {
    if !x.is_finite() {
        return Err(BondError::ArithmeticOverflow(format!(
            "{} produced a non-finite result",
            operation
        )));
    }
    let formatted = format!("{:.*}", FLOAT_PRECISION, x);
    Decimal::from_str(&formatted).map_err(|_| {
        BondError::ArithmeticOverflow(format!("{} result {} out of range", operation, formatted))
    })
}
