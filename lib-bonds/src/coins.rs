//! Denominated amounts
//!
//! `Coins` is always sorted by denomination and holds each denomination at
//! most once, so positional access (`first`) and lookups are deterministic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{BondError, BondResult};

/// A single denominated amount
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Decimal,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Zero amount of `denom`
    pub fn zero(denom: impl Into<String>) -> Self {
        Self::new(denom, Decimal::ZERO)
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Sorted, duplicate-free set of coins
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Empty coin set
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build from arbitrary order; duplicate denominations are rejected
    pub fn new(mut coins: Vec<Coin>) -> BondResult<Self> {
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        if let Some(pair) = coins.windows(2).find(|w| w[0].denom == w[1].denom) {
            return Err(BondError::DuplicateDenomination(pair[0].denom.clone()));
        }
        Ok(Self(coins))
    }

    /// Convenience constructor from `(denom, amount)` pairs
    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, Decimal)>,
    ) -> BondResult<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(denom, amount)| Coin::new(denom, amount))
                .collect(),
        )
    }

    /// Amount held for `denom`, zero if absent
    pub fn amount_of(&self, denom: &str) -> Decimal {
        self.0
            .binary_search_by(|c| c.denom.as_str().cmp(denom))
            .map(|i| self.0[i].amount)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    pub fn denoms(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.denom.as_str())
    }

    pub fn is_any_negative(&self) -> bool {
        self.0.iter().any(Coin::is_negative)
    }

    /// True if any coin exceeds its counterpart in `limits`.
    ///
    /// Denominations absent from (or zero in) `limits` are uncapped.
    pub fn is_any_gt(&self, limits: &Coins) -> bool {
        if limits.is_empty() {
            return false;
        }
        self.0.iter().any(|coin| {
            let limit = limits.amount_of(&coin.denom);
            !limit.is_zero() && coin.amount > limit
        })
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = BondError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Coins::new(coins)
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl IntoIterator for Coins {
    type Item = Coin;
    type IntoIter = std::vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(Coin::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}
