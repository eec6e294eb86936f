//! Fees, order limits and guard checks applied around pricing

use rust_decimal::Decimal;

use crate::bond::Bond;
use crate::coins::{Coin, Coins};
use crate::decimal;
use crate::errors::{BondError, BondResult};
use crate::primitives::Address;

/// `percentage / 100 · amount`, rounded up to the engine precision
fn percentage_fee(percentage: Decimal, coin: &Coin) -> BondResult<Coin> {
    let rate = decimal::quo(percentage, Decimal::ONE_HUNDRED)?;
    let fee = decimal::mul(rate, coin.amount)?;
    Ok(Coin::new(coin.denom.clone(), decimal::quantize_up(fee)))
}

fn percentage_fees(percentage: Decimal, coins: &Coins) -> BondResult<Coins> {
    let fees = coins
        .iter()
        .map(|coin| percentage_fee(percentage, coin))
        .collect::<BondResult<Vec<_>>>()?;
    Coins::new(fees)
}

impl Bond {
    /// Fee charged on a buy or swap of `coin`
    pub fn tx_fee(&self, coin: &Coin) -> BondResult<Coin> {
        percentage_fee(self.tx_fee_percentage, coin)
    }

    /// Fee charged on a sell returning `coin`
    pub fn exit_fee(&self, coin: &Coin) -> BondResult<Coin> {
        percentage_fee(self.exit_fee_percentage, coin)
    }

    pub fn tx_fees(&self, coins: &Coins) -> BondResult<Coins> {
        percentage_fees(self.tx_fee_percentage, coins)
    }

    pub fn exit_fees(&self, coins: &Coins) -> BondResult<Coins> {
        percentage_fees(self.exit_fee_percentage, coins)
    }

    /// Exact, order-sensitive comparison against the bond's signer list
    pub fn signers_equal_to(&self, signers: &[Address]) -> bool {
        self.signers.as_slice() == signers
    }

    /// True if `coins` carries exactly the bond's reserve denominations,
    /// each with a non-zero amount
    pub fn reserve_denoms_equal_to(&self, coins: &Coins) -> bool {
        coins.len() == self.reserve_tokens.len()
            && self
                .reserve_tokens
                .iter()
                .all(|reserve| !coins.amount_of(reserve).is_zero())
    }

    /// True if any amount in `amounts` exceeds its order quantity limit
    pub fn any_order_quantity_limits_exceeded(&self, amounts: &Coins) -> bool {
        amounts.is_any_gt(&self.order_quantity_limits)
    }

    /// True if the ratio of the first two reserve balances falls outside
    /// `sanity_rate ± sanity_margin_percentage`.
    ///
    /// A zero sanity rate disables the check, as does any reserve count
    /// other than two. A zero second balance counts as a violation.
    pub fn reserves_violate_sanity_rate(&self, reserve_balances: &Coins) -> bool {
        if self.sanity_rate.is_zero() {
            return false;
        }
        if self.reserve_tokens.len() != 2 {
            tracing::debug!(
                "Sanity rate not applicable to bond {} with {} reserve tokens",
                self.token,
                self.reserve_tokens.len()
            );
            return false;
        }

        match self.sanity_bounds_violated(reserve_balances) {
            Ok(violated) => violated,
            Err(e) => {
                tracing::warn!("Sanity rate check for bond {} failed: {}", self.token, e);
                true
            }
        }
    }

    fn sanity_bounds_violated(&self, reserve_balances: &Coins) -> BondResult<bool> {
        let first = reserve_balances.amount_of(&self.reserve_tokens[0]);
        let second = reserve_balances.amount_of(&self.reserve_tokens[1]);
        if second.is_zero() {
            return Ok(true);
        }

        let rate = decimal::quo(first, second)?;
        let margin = decimal::mul(
            self.sanity_rate,
            decimal::quo(self.sanity_margin_percentage, Decimal::ONE_HUNDRED)?,
        )?;
        let upper = decimal::add(self.sanity_rate, margin)?;
        let lower = decimal::sub(self.sanity_rate, margin)?.max(Decimal::ZERO);

        tracing::debug!(
            "Sanity check for bond {}: rate {} bounds [{}, {}]",
            self.token,
            rate,
            lower,
            upper
        );
        Ok(rate < lower || rate > upper)
    }

    /// Fails if minting `mint` would take supply past the cap
    pub fn check_max_supply(&self, mint: Decimal) -> BondResult<()> {
        let would_have = decimal::add(self.supply()?, mint)?;
        if would_have > self.max_supply.amount {
            return Err(BondError::MaxSupplyExceeded {
                max: self.max_supply.amount,
                would_have,
            });
        }
        Ok(())
    }

    pub fn ensure_sells_allowed(&self) -> BondResult<()> {
        if self.allow_sells {
            Ok(())
        } else {
            Err(BondError::SellsNotAllowed)
        }
    }
}

/// Round prices up to whole units so a buyer never underpays
pub fn round_reserve_prices(prices: &Coins) -> BondResult<Coins> {
    Coins::new(
        prices
            .iter()
            .map(|c| Coin::new(c.denom.clone(), decimal::ceil_units(c.amount)))
            .collect(),
    )
}

/// Round returns down to whole units so the reserve never overpays
pub fn round_reserve_returns(returns: &Coins) -> BondResult<Coins> {
    Coins::new(
        returns
            .iter()
            .map(|c| Coin::new(c.denom.clone(), decimal::truncate_units(c.amount)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{FunctionParams, FunctionType};
    use rust_decimal_macros::dec;

    fn swapper_bond() -> Bond {
        Bond::new(
            "pool",
            "Pool",
            "Two-reserve swapper",
            Address::new([1u8; 32]),
            FunctionType::Swapper,
            FunctionParams::default(),
            vec!["aaa".to_string(), "bbb".to_string()],
            dec!(1000),
        )
    }

    #[test]
    fn test_fees_round_up() {
        let bond = swapper_bond().with_fees(dec!(1), dec!(2), Address::zero());

        assert_eq!(bond.tx_fee(&Coin::new("aaa", dec!(10))).unwrap().amount, dec!(0.1));
        assert_eq!(bond.exit_fee(&Coin::new("aaa", dec!(10))).unwrap().amount, dec!(0.2));

        // 1% of 1e-18 is below the precision floor and rounds up to one unit
        let tiny = bond.tx_fee(&Coin::new("aaa", dec!(0.000000000000000001))).unwrap();
        assert_eq!(tiny.amount, dec!(0.000000000000000001));
    }

    #[test]
    fn test_zero_fee_percentage() {
        let bond = swapper_bond();
        assert!(bond.tx_fee(&Coin::new("aaa", dec!(500))).unwrap().is_zero());
    }

    #[test]
    fn test_fees_over_coins() {
        let bond = swapper_bond().with_fees(dec!(0.5), dec!(0), Address::zero());
        let coins = Coins::from_pairs([("aaa", dec!(100)), ("bbb", dec!(300))]).unwrap();

        let fees = bond.tx_fees(&coins).unwrap();
        assert_eq!(fees.amount_of("aaa"), dec!(0.5));
        assert_eq!(fees.amount_of("bbb"), dec!(1.5));
        assert!(bond.exit_fees(&coins).unwrap().iter().all(Coin::is_zero));
    }

    #[test]
    fn test_signers_order_sensitive() {
        let a = Address::new([1u8; 32]);
        let b = Address::new([2u8; 32]);
        let bond = swapper_bond().with_signers(vec![a, b]);

        assert!(bond.signers_equal_to(&[a, b]));
        assert!(!bond.signers_equal_to(&[b, a]));
        assert!(!bond.signers_equal_to(&[a]));
    }

    #[test]
    fn test_reserve_denoms_equal_to() {
        let bond = swapper_bond();
        let exact = Coins::from_pairs([("aaa", dec!(1)), ("bbb", dec!(1))]).unwrap();
        let partial = Coins::from_pairs([("aaa", dec!(1))]).unwrap();
        let other = Coins::from_pairs([("aaa", dec!(1)), ("ccc", dec!(1))]).unwrap();
        let zero_amount = Coins::from_pairs([("aaa", dec!(0)), ("bbb", dec!(5))]).unwrap();

        assert!(bond.reserve_denoms_equal_to(&exact));
        assert!(!bond.reserve_denoms_equal_to(&partial));
        assert!(!bond.reserve_denoms_equal_to(&other));
        assert!(!bond.reserve_denoms_equal_to(&zero_amount));
    }

    #[test]
    fn test_order_quantity_limits() {
        let limits = Coins::from_pairs([("aaa", dec!(100))]).unwrap();
        let bond = swapper_bond().with_order_quantity_limits(limits);

        let within = Coins::from_pairs([("aaa", dec!(100)), ("bbb", dec!(1000000))]).unwrap();
        let over = Coins::from_pairs([("aaa", dec!(100.5))]).unwrap();
        assert!(!bond.any_order_quantity_limits_exceeded(&within));
        assert!(bond.any_order_quantity_limits_exceeded(&over));

        // No limits configured
        assert!(!swapper_bond().any_order_quantity_limits_exceeded(&over));
    }

    #[test]
    fn test_sanity_rate() {
        let bond = swapper_bond().with_sanity(dec!(2), dec!(5));

        let ok = Coins::from_pairs([("aaa", dec!(208)), ("bbb", dec!(100))]).unwrap();
        let high = Coins::from_pairs([("aaa", dec!(215)), ("bbb", dec!(100))]).unwrap();
        let low = Coins::from_pairs([("aaa", dec!(189)), ("bbb", dec!(100))]).unwrap();
        let empty_second = Coins::from_pairs([("aaa", dec!(10))]).unwrap();

        assert!(!bond.reserves_violate_sanity_rate(&ok));
        assert!(bond.reserves_violate_sanity_rate(&high));
        assert!(bond.reserves_violate_sanity_rate(&low));
        assert!(bond.reserves_violate_sanity_rate(&empty_second));
    }

    #[test]
    fn test_sanity_rate_disabled() {
        let balances = Coins::from_pairs([("aaa", dec!(1)), ("bbb", dec!(1000))]).unwrap();
        assert!(!swapper_bond().reserves_violate_sanity_rate(&balances));
    }

    #[test]
    fn test_max_supply() {
        let mut bond = swapper_bond();
        bond.current_supply.amount = dec!(900);

        assert!(bond.check_max_supply(dec!(100)).is_ok());
        assert_eq!(
            bond.check_max_supply(dec!(101)),
            Err(BondError::MaxSupplyExceeded {
                max: dec!(1000),
                would_have: dec!(1001)
            })
        );
    }

    #[test]
    fn test_sells_flag() {
        assert!(swapper_bond().ensure_sells_allowed().is_ok());
        assert_eq!(
            swapper_bond().with_sells(false).ensure_sells_allowed(),
            Err(BondError::SellsNotAllowed)
        );
    }

    #[test]
    fn test_reserve_rounding() {
        let coins = Coins::from_pairs([("aaa", dec!(3.2)), ("bbb", dec!(7))]).unwrap();

        let prices = round_reserve_prices(&coins).unwrap();
        assert_eq!(prices.amount_of("aaa"), dec!(4));
        assert_eq!(prices.amount_of("bbb"), dec!(7));

        let returns = round_reserve_returns(&coins).unwrap();
        assert_eq!(returns.amount_of("aaa"), dec!(3));
        assert_eq!(returns.amount_of("bbb"), dec!(7));
    }
}
