//! Curve Family Evaluator
//!
//! Typed curve payloads and their closed-form spot price and integral.
//!
//! | Family    | Spot price                  | Integral from 0 to x                    |
//! |-----------|-----------------------------|-----------------------------------------|
//! | Power     | m·xⁿ + c                    | m·xⁿ⁺¹/(n+1) + c·x                      |
//! | Sigmoid   | a·((x−b)/√((x−b)²+c) + 1)   | a·(√((x−b)²+c) + x) − a·√(b²+c)         |
//! | Augmented | P(R(x)), float              | R(x), float                             |
//! | Swapper   | not available               | undefined                               |
//!
//! Results are returned at full substrate precision; the bond layer quantizes
//! them and enforces non-negativity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::augmented;
use crate::decimal;
use crate::errors::{BondError, BondResult, InvariantViolation};
use crate::function::params::required;
use crate::function::{FunctionParams, FunctionType};

/// A validated curve with one payload shape per family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Curve {
    Power {
        m: Decimal,
        /// Integral exponent (enforced by validation)
        n: u64,
        c: Decimal,
    },
    Sigmoid {
        a: Decimal,
        b: Decimal,
        c: Decimal,
    },
    Swapper,
    Augmented {
        d0: Decimal,
        p0: Decimal,
        theta: Decimal,
        kappa: Decimal,
    },
}

impl Curve {
    /// Validate `params` for `function_type` and build the typed curve
    pub fn from_params(function_type: FunctionType, params: &FunctionParams) -> BondResult<Self> {
        params.validate(function_type)?;
        let args = params.as_map();

        let curve = match function_type {
            FunctionType::Power => Curve::Power {
                m: required(&args, "m")?,
                n: decimal::truncate_to_u64(required(&args, "n")?, "n")?,
                c: required(&args, "c")?,
            },
            FunctionType::Sigmoid => Curve::Sigmoid {
                a: required(&args, "a")?,
                b: required(&args, "b")?,
                c: required(&args, "c")?,
            },
            FunctionType::Swapper => Curve::Swapper,
            FunctionType::Augmented => Curve::Augmented {
                d0: required(&args, "d0")?,
                p0: required(&args, "p0")?,
                theta: required(&args, "theta")?,
                kappa: required(&args, "kappa")?,
            },
        };
        Ok(curve)
    }

    pub fn function_type(&self) -> FunctionType {
        match self {
            Curve::Power { .. } => FunctionType::Power,
            Curve::Sigmoid { .. } => FunctionType::Sigmoid,
            Curve::Swapper => FunctionType::Swapper,
            Curve::Augmented { .. } => FunctionType::Augmented,
        }
    }

    /// Spot price at supply `x`
    pub fn price_at(&self, x: Decimal) -> BondResult<Decimal> {
        match *self {
            Curve::Power { m, n, c } => decimal::add(decimal::mul(decimal::power(x, n)?, m)?, c),
            Curve::Sigmoid { a, b, c } => {
                let shifted = decimal::sub(x, b)?;
                let radicand = decimal::add(decimal::mul(shifted, shifted)?, c)?;
                let root = decimal::approx_sqrt(radicand)?;
                let ratio = decimal::quo(shifted, root)?;
                decimal::mul(a, decimal::add(ratio, Decimal::ONE)?)
            }
            Curve::Augmented { .. } => {
                let (kappa, v0) = self.augmented_constants()?;
                let reserve = augmented::reserve(decimal::to_f64(x)?, kappa, v0);
                let price = augmented::spot_price(reserve, kappa, v0);
                decimal::from_f64_rounded(price, "augmented spot price")
            }
            Curve::Swapper => Err(BondError::FunctionNotAvailable(FunctionType::Swapper)),
        }
    }

    /// Reserve required to back supply `x`
    pub fn integral(&self, x: Decimal) -> BondResult<Decimal> {
        match *self {
            Curve::Power { m, n, c } => {
                let exponent = n
                    .checked_add(1)
                    .ok_or_else(|| BondError::overflow("power exponent"))?;
                let scaled = decimal::mul(decimal::power(x, exponent)?, m)?;
                let area = decimal::quo(scaled, Decimal::from(exponent))?;
                decimal::add(area, decimal::mul(x, c)?)
            }
            Curve::Sigmoid { a, b, c } => {
                let shifted = decimal::sub(x, b)?;
                let radicand = decimal::add(decimal::mul(shifted, shifted)?, c)?;
                let root = decimal::approx_sqrt(radicand)?;
                let upper = decimal::mul(a, decimal::add(root, x)?)?;
                let origin = decimal::approx_sqrt(decimal::add(decimal::mul(b, b)?, c)?)?;
                decimal::sub(upper, decimal::mul(a, origin)?)
            }
            Curve::Augmented { .. } => {
                let (kappa, v0) = self.augmented_constants()?;
                let reserve = augmented::reserve(decimal::to_f64(x)?, kappa, v0);
                decimal::from_f64_rounded(reserve, "augmented reserve")
            }
            Curve::Swapper => Err(InvariantViolation::UndefinedIntegral(FunctionType::Swapper).into()),
        }
    }

    /// Augmented reserve deposit for minting `delta_s` on top of `supply`
    pub(crate) fn augmented_mint_cost(
        &self,
        delta_s: Decimal,
        reserve: Decimal,
        supply: Decimal,
    ) -> BondResult<Decimal> {
        let (kappa, v0) = self.augmented_constants()?;
        let (delta_r, _) = augmented::mint_alt(
            decimal::to_f64(delta_s)?,
            decimal::to_f64(reserve)?,
            decimal::to_f64(supply)?,
            kappa,
            v0,
        );
        decimal::from_f64_rounded(delta_r, "augmented mint")
    }

    /// Augmented reserve released for burning `delta_s` from `supply`
    pub(crate) fn augmented_burn_return(
        &self,
        delta_s: Decimal,
        reserve: Decimal,
        supply: Decimal,
    ) -> BondResult<Decimal> {
        let (kappa, v0) = self.augmented_constants()?;
        let (delta_r, _) = augmented::withdraw(
            decimal::to_f64(delta_s)?,
            decimal::to_f64(reserve)?,
            decimal::to_f64(supply)?,
            kappa,
            v0,
        );
        decimal::from_f64_rounded(delta_r, "augmented withdraw")
    }

    /// `(κ, V0)` as floats
    fn augmented_constants(&self) -> BondResult<(f64, f64)> {
        match *self {
            Curve::Augmented { d0, p0, theta, kappa } => {
                let kappa = decimal::to_f64(kappa)?;
                let v0 = augmented::initial_invariant(
                    decimal::to_f64(d0)?,
                    decimal::to_f64(p0)?,
                    decimal::to_f64(theta)?,
                    kappa,
                );
                if !v0.is_finite() || !kappa.is_finite() {
                    return Err(BondError::ArithmeticOverflow(
                        "augmented invariant is not finite".to_string(),
                    ));
                }
                Ok((kappa, v0))
            }
            _ => Err(BondError::FunctionNotAvailable(self.function_type())),
        }
    }
}
