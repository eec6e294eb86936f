//! Bond Pricing Operations
//!
//! Buy, sell and swap quotes derived from the bond's curve and the caller's
//! view of the reserve balances. Every operation is a pure function of its
//! inputs; the caller applies the resulting deltas.
//!
//! # Conventions
//! - Amounts are truncated to the engine precision before they are returned
//! - Lockstep families (Power, Sigmoid, Augmented) treat the first reserve
//!   balance as the common balance of every reserve token
//! - Negative caller inputs are rejected; negative computed results are
//!   invariant violations

use rust_decimal::Decimal;

use crate::bond::Bond;
use crate::coins::{Coin, Coins};
use crate::config::ValidationConfig;
use crate::curve::Curve;
use crate::decimal;
use crate::errors::{BondError, BondResult, InvariantViolation};
use crate::function::FunctionType;

/// Smallest reserve deposit charged for a mint on a lockstep curve whose
/// reserve already exceeds the integral
pub const MIN_MINT_PRICE: Decimal = Decimal::ONE;

/// Result of a reserve-to-reserve swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReturn {
    /// Reserve tokens paid out
    pub returns: Coin,
    /// Transaction fee taken from the input
    pub fee: Coin,
}

fn ensure_non_negative(value: Decimal, name: &str) -> BondResult<()> {
    if value < Decimal::ZERO {
        return Err(BondError::NegativeArgument(name.to_string()));
    }
    Ok(())
}

fn ensure_balances_non_negative(balances: &Coins) -> BondResult<()> {
    if balances.is_any_negative() {
        return Err(BondError::NegativeArgument("reserve balances".to_string()));
    }
    Ok(())
}

impl Bond {
    /// Check reserve balances before a lockstep pricing call.
    ///
    /// Non-uniform balances are logged, or rejected when
    /// `require_uniform_reserves` is set.
    pub fn check_reserve_balances(&self, reserve_balances: &Coins, config: &ValidationConfig) -> BondResult<()> {
        ensure_balances_non_negative(reserve_balances)?;
        if !self.function_type.has_lockstep_reserves() {
            return Ok(());
        }

        let first = self.common_reserve_balance(reserve_balances);
        let uniform = self
            .reserve_tokens
            .iter()
            .all(|denom| reserve_balances.amount_of(denom) == first);
        if uniform {
            return Ok(());
        }

        if config.require_uniform_reserves {
            return Err(BondError::NonUniformReserves(reserve_balances.to_string()));
        }
        tracing::warn!(
            "Bond {} reserve balances are not uniform ({}); pricing uses the first balance {}",
            self.token,
            reserve_balances,
            first
        );
        Ok(())
    }

    /// Balance of the first reserve token, or zero
    fn common_reserve_balance(&self, reserve_balances: &Coins) -> Decimal {
        self.reserve_tokens
            .first()
            .map(|denom| reserve_balances.amount_of(denom))
            .unwrap_or(Decimal::ZERO)
    }

    /// Spot price at `supply`, one coin per reserve token
    pub fn prices_at_supply(&self, supply: Decimal) -> BondResult<Coins> {
        ensure_non_negative(supply, "supply")?;
        let curve = self.curve()?;

        let price = decimal::quantize(curve.price_at(supply)?);
        if price < Decimal::ZERO {
            return Err(InvariantViolation::NegativePrice {
                bond: self.token.clone(),
            }
            .into());
        }

        tracing::debug!("Bond {} price at supply {}: {}", self.token, supply, price);
        self.new_reserve_coins(price)
    }

    /// Price of one token now.
    ///
    /// Swapper bonds quote the reserve cost of minting one token; every other
    /// family quotes the spot price at the current supply.
    pub fn current_prices_per_token(&self, reserve_balances: &Coins) -> BondResult<Coins> {
        match self.function_type {
            FunctionType::Swapper => self.prices_to_mint(Decimal::ONE, reserve_balances),
            FunctionType::Power | FunctionType::Sigmoid | FunctionType::Augmented => {
                self.prices_at_supply(self.supply()?)
            }
        }
    }

    /// Reserve required to back `supply`
    pub fn curve_integral(&self, supply: Decimal) -> BondResult<Decimal> {
        ensure_non_negative(supply, "supply")?;
        let curve = self.curve()?;
        self.integral_of(&curve, supply)
    }

    fn integral_of(&self, curve: &Curve, supply: Decimal) -> BondResult<Decimal> {
        let integral = decimal::quantize(curve.integral(supply)?);
        if integral < Decimal::ZERO {
            return Err(InvariantViolation::NegativeIntegral {
                bond: self.token.clone(),
            }
            .into());
        }
        Ok(integral)
    }

    /// Reserve amounts matching a change of `delta` in Swapper supply.
    ///
    /// Each reserve moves by `delta / supply` of its balance.
    pub fn reserve_delta_for_liquidity_delta(&self, delta: Decimal, reserve_balances: &Coins) -> BondResult<Coins> {
        ensure_non_negative(delta, "liquidity delta")?;
        ensure_balances_non_negative(reserve_balances)?;
        if self.function_type != FunctionType::Swapper {
            return Err(BondError::FunctionNotAvailable(self.function_type));
        }
        if self.reserve_tokens.len() != 2 {
            return Err(BondError::IncorrectReserveTokenCount {
                expected: 2,
                actual: self.reserve_tokens.len(),
            });
        }

        let supply = self.supply()?;
        if supply.is_zero() {
            return Err(BondError::RequiresNonZeroSupply);
        }

        let share = decimal::quo(delta, supply)?;
        let mut deltas = Vec::with_capacity(self.reserve_tokens.len());
        for denom in &self.reserve_tokens {
            let amount = decimal::quantize(decimal::mul(share, reserve_balances.amount_of(denom))?);
            if amount < Decimal::ZERO {
                return Err(InvariantViolation::NegativeReserveDelta {
                    bond: self.token.clone(),
                }
                .into());
            }
            deltas.push(Coin::new(denom.clone(), amount));
        }
        Coins::new(deltas)
    }

    /// Reserve deposit required to mint `mint` tokens
    pub fn prices_to_mint(&self, mint: Decimal, reserve_balances: &Coins) -> BondResult<Coins> {
        ensure_non_negative(mint, "mint amount")?;
        ensure_balances_non_negative(reserve_balances)?;
        let supply = self.supply()?;
        let curve = self.curve()?;

        let price = match curve {
            Curve::Power { .. } | Curve::Sigmoid { .. } => {
                let target = self.integral_of(&curve, decimal::add(supply, mint)?)?;
                let reserve = self.common_reserve_balance(reserve_balances);
                let price = decimal::quantize(decimal::sub(target, reserve)?);
                if price < Decimal::ZERO {
                    tracing::debug!(
                        "Bond {} reserve {} exceeds integral {}, charging minimum mint price",
                        self.token,
                        reserve,
                        target
                    );
                    MIN_MINT_PRICE
                } else {
                    price
                }
            }
            Curve::Augmented { .. } => {
                let reserve = self.common_reserve_balance(reserve_balances);
                let price = decimal::quantize(curve.augmented_mint_cost(mint, reserve, supply)?);
                if price < Decimal::ZERO {
                    return Err(InvariantViolation::NegativePrice {
                        bond: self.token.clone(),
                    }
                    .into());
                }
                price
            }
            Curve::Swapper => {
                if supply.is_zero() {
                    return Err(BondError::RequiresNonZeroSupply);
                }
                return self.reserve_delta_for_liquidity_delta(mint, reserve_balances);
            }
        };

        tracing::debug!(
            "Bond {} mint {} at supply {}: price {}",
            self.token,
            mint,
            supply,
            price
        );
        self.new_reserve_coins(price)
    }

    /// Reserve released by burning `burn` tokens
    pub fn returns_for_burn(&self, burn: Decimal, reserve_balances: &Coins) -> BondResult<Coins> {
        ensure_non_negative(burn, "burn amount")?;
        ensure_balances_non_negative(reserve_balances)?;
        let supply = self.supply()?;
        let curve = self.curve()?;

        if burn > supply {
            return Err(BondError::InsufficientSupply { supply, burn });
        }

        let reserve = self.common_reserve_balance(reserve_balances);
        let returns = match curve {
            Curve::Power { .. } | Curve::Sigmoid { .. } => {
                let remaining = self.integral_of(&curve, decimal::sub(supply, burn)?)?;
                if remaining > reserve {
                    return Err(InvariantViolation::InsufficientReserveForBurn {
                        required: remaining,
                        available: reserve,
                    }
                    .into());
                }
                decimal::quantize(decimal::sub(reserve, remaining)?)
            }
            Curve::Augmented { .. } => {
                let returns = decimal::quantize(curve.augmented_burn_return(burn, reserve, supply)?);
                if returns < Decimal::ZERO {
                    return Err(InvariantViolation::NegativeReserveDelta {
                        bond: self.token.clone(),
                    }
                    .into());
                }
                returns
            }
            Curve::Swapper => return self.reserve_delta_for_liquidity_delta(burn, reserve_balances),
        };

        tracing::debug!(
            "Bond {} burn {} at supply {}: returns {}",
            self.token,
            burn,
            supply,
            returns
        );
        self.new_reserve_coins(returns)
    }

    /// Constant-product swap of `from` into `to_denom`, after the tx fee
    pub fn returns_for_swap(&self, from: &Coin, to_denom: &str, reserve_balances: &Coins) -> BondResult<SwapReturn> {
        ensure_non_negative(from.amount, "swap amount")?;
        ensure_balances_non_negative(reserve_balances)?;
        if self.function_type != FunctionType::Swapper {
            return Err(BondError::FunctionNotAvailable(self.function_type));
        }
        if !self.is_reserve_token(&from.denom) {
            return Err(BondError::InvalidReserveToken(from.denom.clone()));
        }
        if !self.is_reserve_token(to_denom) {
            return Err(BondError::InvalidReserveToken(to_denom.to_string()));
        }

        let in_reserve = reserve_balances.amount_of(&from.denom);
        let out_reserve = reserve_balances.amount_of(to_denom);

        let fee = self.tx_fee(from)?;
        let input = decimal::sub(from.amount, fee.amount)?;
        let too_small = || BondError::SwapTooSmall {
            from: from.to_string(),
            to: to_denom.to_string(),
        };
        if input <= Decimal::ZERO {
            return Err(too_small());
        }

        // out = input · outRes / (inRes + input)
        let output = decimal::quantize(decimal::quo(
            decimal::mul(input, out_reserve)?,
            decimal::add(in_reserve, input)?,
        )?);

        if output == out_reserve {
            return Err(BondError::ReserveDepletion {
                from: from.to_string(),
                to: to_denom.to_string(),
            });
        }
        if output.is_zero() {
            return Err(too_small());
        }
        if output < Decimal::ZERO {
            return Err(InvariantViolation::NegativeSwapReturn {
                bond: self.token.clone(),
            }
            .into());
        }

        tracing::debug!(
            "Bond {} swap {} -> {}{} (fee {})",
            self.token,
            from,
            output,
            to_denom,
            fee
        );
        Ok(SwapReturn {
            returns: Coin::new(to_denom, output),
            fee,
        })
    }
}
