//! Bonding Curve Pricing Engine
//!
//! Deterministic pricing for tokens whose supply is minted and burned against
//! reserve tokens along a bonding curve.
//!
//! # Design Principles
//!
//! 1. **Pure functions** - Quotes never mutate the bond; the ledger applies deltas
//! 2. **Deterministic** - Fixed 18-digit decimal arithmetic for Power, Sigmoid and Swapper
//! 3. **Overflow-safe** - Checked arithmetic, overflow is a recoverable error
//! 4. **Two error tiers** - Invalid input is recoverable, broken invariants are fatal
//!
//! # Curve Families
//!
//! | Family    | Reserves | Parameters          |
//! |-----------|----------|---------------------|
//! | Power     | any      | m, n (integer), c   |
//! | Sigmoid   | any      | a, b, c (> 0)       |
//! | Swapper   | exactly 2| none                |
//! | Augmented | any      | d0, p0, theta, kappa|
//!
//! # Usage
//!
//! ```ignore
//! use lib_bonds::{Bond, Coins, FunctionParams, FunctionType};
//! use rust_decimal_macros::dec;
//!
//! let bond = Bond::new(
//!     "abc", "A B C", "Power curve", creator,
//!     FunctionType::Power,
//!     FunctionParams::from_pairs([("m", dec!(12)), ("n", dec!(2)), ("c", dec!(100))]),
//!     vec!["res".to_string()],
//!     dec!(1000000),
//! );
//! bond.validate()?;
//! let prices = bond.prices_to_mint(dec!(10), &Coins::empty())?;
//! ```

pub mod bond;
pub mod checks;
pub mod client;
pub mod coins;
pub mod config;
pub mod curve;
pub mod decimal;
pub mod errors;
pub mod function;
pub mod pricing;
pub mod primitives;

#[cfg(test)]
mod golden_vectors;

pub use bond::Bond;
pub use checks::{round_reserve_prices, round_reserve_returns};
pub use client::{parse_function_params, parse_signers, parse_two_part_coin};
pub use coins::{Coin, Coins};
pub use config::{BondsConfig, ConfigError, ValidationConfig};
pub use curve::Curve;
pub use errors::{BondError, BondResult, InvariantViolation};
pub use function::{FunctionParam, FunctionParams, FunctionType};
pub use pricing::{SwapReturn, MIN_MINT_PRICE};
pub use primitives::{Address, BatchBlocks};
