//! Human-facing input parsing
//!
//! String forms accepted from command lines and config files:
//!
//! - function parameters: `"m:12,n:2,c:100"`
//! - signers: comma-separated 64-char hex addresses
//! - coins: amount and denomination given separately

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::coins::Coin;
use crate::errors::{BondError, BondResult};
use crate::function::{FunctionParam, FunctionParams};
use crate::primitives::Address;

/// Parse `"a:1,b:2"` into a parameter set.
///
/// Blank input gives an empty set. Each entry splits on its first colon; a
/// repeated name keeps the last value. The result is ordered by name.
pub fn parse_function_params(input: &str) -> BondResult<FunctionParams> {
    if input.trim().is_empty() {
        return Ok(FunctionParams::default());
    }

    let mut values = BTreeMap::new();
    for entry in input.split(',') {
        let (name, value) = entry
            .split_once(':')
            .ok_or_else(|| BondError::InvalidParameterFormat(entry.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(BondError::InvalidParameterFormat(entry.to_string()));
        }
        let value = Decimal::from_str(value.trim())
            .map_err(|_| BondError::InvalidParameterFormat(entry.to_string()))?;
        values.insert(name.to_string(), value);
    }

    Ok(FunctionParams::new(
        values
            .into_iter()
            .map(|(name, value)| FunctionParam::new(name, value))
            .collect(),
    ))
}

/// Parse comma-separated hex addresses, keeping their order
pub fn parse_signers(input: &str) -> BondResult<Vec<Address>> {
    input.split(',').map(|s| Address::from_str(s.trim())).collect()
}

/// Build a coin from separate amount and denomination strings
pub fn parse_two_part_coin(amount: &str, denom: &str) -> BondResult<Coin> {
    if !is_valid_denom(denom) {
        return Err(BondError::InvalidParameterFormat(format!(
            "invalid coin denomination: {}",
            denom
        )));
    }
    let amount = Decimal::from_str(amount.trim())
        .map_err(|_| BondError::InvalidParameterFormat(format!("invalid coin amount: {}", amount)))?;
    if amount < Decimal::ZERO {
        return Err(BondError::NegativeArgument(format!("{}{}", amount, denom)));
    }
    Ok(Coin::new(denom, amount))
}

/// Lowercase letter followed by 2–15 lowercase letters or digits
fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().map_or(false, |c| c.is_ascii_lowercase());
    starts_with_letter
        && (3..=16).contains(&denom.len())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
