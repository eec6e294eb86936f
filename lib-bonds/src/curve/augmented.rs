//! Augmented bonding curve formulas
//!
//! The curve is defined by the invariant `V(R, S) = S^κ / R`, held constant at
//! its initial value `V0` while minting and burning:
//!
//! ```text
//!   R0 = d0 · (1 − θ)        initial reserve after the funding pool takes θ
//!   S0 = d0 / p0             initial supply at hatch price p0
//!   V0 = S0^κ / R0
//!   R(S) = S^κ / V0
//!   P(R) = κ · R^((κ−1)/κ) / V0^(1/κ)
//! ```
//!
//! Evaluated in `f64`. These results are not guaranteed to be bit-identical
//! across platforms; callers round them through `decimal::from_f64_rounded`.

/// Invariant `S^κ / R`
pub fn invariant(reserve: f64, supply: f64, kappa: f64) -> f64 {
    supply.powf(kappa) / reserve
}

/// `V0` from hatch parameters
pub fn initial_invariant(d0: f64, p0: f64, theta: f64, kappa: f64) -> f64 {
    let r0 = d0 * (1.0 - theta);
    let s0 = d0 / p0;
    invariant(r0, s0, kappa)
}

/// Reserve backing `supply`
pub fn reserve(supply: f64, kappa: f64, v0: f64) -> f64 {
    supply.powf(kappa) / v0
}

/// Spot price at `reserve`
pub fn spot_price(reserve: f64, kappa: f64, v0: f64) -> f64 {
    kappa * reserve.powf((kappa - 1.0) / kappa) / v0.powf(1.0 / kappa)
}

/// Reserve deposit required to mint `delta_s`.
///
/// Returns `(delta_r, realized_price)`.
pub fn mint_alt(delta_s: f64, reserve: f64, supply: f64, kappa: f64, v0: f64) -> (f64, f64) {
    let delta_r = (supply + delta_s).powf(kappa) / v0 - reserve;
    (delta_r, delta_r / delta_s)
}

/// Reserve released when burning `delta_s`.
///
/// Returns `(delta_r, realized_price)`.
pub fn withdraw(delta_s: f64, reserve: f64, supply: f64, kappa: f64, v0: f64) -> (f64, f64) {
    let delta_r = reserve - (supply - delta_s).powf(kappa) / v0;
    (delta_r, delta_r / delta_s)
}
