//! Bond Configuration
//!
//! A bond bundles a curve family and its parameters with the reserve token
//! set, fee schedule, supply cap and sanity bounds of one bonded token.
//!
//! # Invariants
//! - Parameters match the family's registry entry
//! - Reserve tokens are sorted, unique and sized per family
//! - Current supply is never negative and starts at zero
//! - Fee percentages are 0–100 scaled and add up to less than 100
//!
//! The engine never mutates a bond while pricing; supply and reserve changes
//! are applied by the ledger after it accepts the computed deltas.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coins::{Coin, Coins};
use crate::config::ValidationConfig;
use crate::curve::Curve;
use crate::errors::{BondError, BondResult, InvariantViolation};
use crate::function::{FunctionParams, FunctionType, ReserveTokenCount};
use crate::primitives::{Address, BatchBlocks};

/// Bond configuration and state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    // === Identity ===
    /// Bonded token denomination
    pub token: String,
    pub name: String,
    pub description: String,
    pub creator: Address,
    /// Ordered multisig set authorised to edit the bond
    pub signers: Vec<Address>,

    // === Curve ===
    pub function_type: FunctionType,
    pub function_parameters: FunctionParams,
    /// Sorted, unique reserve denominations
    pub reserve_tokens: Vec<String>,
    /// Reserve custody address
    pub reserve_address: Address,

    // === Economics ===
    /// Fee on buys and swaps, 0–100 scaled
    pub tx_fee_percentage: Decimal,
    /// Fee on sells, 0–100 scaled
    pub exit_fee_percentage: Decimal,
    pub fee_address: Address,
    pub max_supply: Coin,
    /// Per-order caps, one per denomination
    pub order_quantity_limits: Coins,
    /// Reference `reserve[0] / reserve[1]` rate; zero disables the check
    pub sanity_rate: Decimal,
    pub sanity_margin_percentage: Decimal,
    pub allow_sells: bool,
    pub batch_blocks: BatchBlocks,

    // === State ===
    /// Circulating supply, maintained by the ledger
    pub current_supply: Coin,
}

impl Bond {
    /// Create a bond with zero supply.
    ///
    /// Reserve tokens are sorted and deduplicated. Economics default to no
    /// fees, no order limits, no sanity check, sells allowed, the creator as
    /// sole signer and single-block batches; use the `with_*` setters to
    /// change them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        creator: Address,
        function_type: FunctionType,
        function_parameters: FunctionParams,
        mut reserve_tokens: Vec<String>,
        max_supply: Decimal,
    ) -> Self {
        let token = token.into();
        reserve_tokens.sort();
        reserve_tokens.dedup();

        Self {
            max_supply: Coin::new(token.clone(), max_supply),
            current_supply: Coin::zero(token.clone()),
            token,
            name: name.into(),
            description: description.into(),
            creator,
            signers: vec![creator],
            function_type,
            function_parameters,
            reserve_tokens,
            reserve_address: Address::zero(),
            tx_fee_percentage: Decimal::ZERO,
            exit_fee_percentage: Decimal::ZERO,
            fee_address: Address::zero(),
            order_quantity_limits: Coins::empty(),
            sanity_rate: Decimal::ZERO,
            sanity_margin_percentage: Decimal::ZERO,
            allow_sells: true,
            batch_blocks: 1,
        }
    }

    pub fn with_fees(mut self, tx_fee_percentage: Decimal, exit_fee_percentage: Decimal, fee_address: Address) -> Self {
        self.tx_fee_percentage = tx_fee_percentage;
        self.exit_fee_percentage = exit_fee_percentage;
        self.fee_address = fee_address;
        self
    }

    pub fn with_reserve_address(mut self, reserve_address: Address) -> Self {
        self.reserve_address = reserve_address;
        self
    }

    pub fn with_order_quantity_limits(mut self, limits: Coins) -> Self {
        self.order_quantity_limits = limits;
        self
    }

    pub fn with_sanity(mut self, sanity_rate: Decimal, sanity_margin_percentage: Decimal) -> Self {
        self.sanity_rate = sanity_rate;
        self.sanity_margin_percentage = sanity_margin_percentage;
        self
    }

    pub fn with_sells(mut self, allow_sells: bool) -> Self {
        self.allow_sells = allow_sells;
        self
    }

    pub fn with_signers(mut self, signers: Vec<Address>) -> Self {
        self.signers = signers;
        self
    }

    pub fn with_batch_blocks(mut self, batch_blocks: BatchBlocks) -> Self {
        self.batch_blocks = batch_blocks;
        self
    }

    /// Typed curve for this bond's family and parameters
    pub fn curve(&self) -> BondResult<Curve> {
        Curve::from_params(self.function_type, &self.function_parameters)
    }

    /// Current supply amount; a negative value is a ledger bug
    pub fn supply(&self) -> BondResult<Decimal> {
        if self.current_supply.is_negative() {
            return Err(InvariantViolation::NegativeSupply {
                bond: self.token.clone(),
            }
            .into());
        }
        Ok(self.current_supply.amount)
    }

    /// Validate with default (permissive) settings
    pub fn validate(&self) -> BondResult<()> {
        self.validate_with(&ValidationConfig::default())
    }

    /// Check every configuration invariant
    pub fn validate_with(&self, config: &ValidationConfig) -> BondResult<()> {
        if config.reject_duplicate_params {
            self.function_parameters.validate_strict(self.function_type)?;
        } else {
            self.function_parameters.validate(self.function_type)?;
        }

        self.validate_reserve_tokens()?;

        if self.order_quantity_limits.is_any_negative() {
            return Err(BondError::OrderQuantityLimitsInvalid);
        }

        self.validate_fees()?;

        if self.sanity_rate < Decimal::ZERO {
            return Err(BondError::NegativeArgument("SanityRate".to_string()));
        }
        if self.sanity_margin_percentage < Decimal::ZERO {
            return Err(BondError::NegativeArgument("SanityMarginPercentage".to_string()));
        }

        if self.max_supply.denom != self.token {
            return Err(BondError::InvalidMaxSupply(format!(
                "denomination {} does not match token {}",
                self.max_supply.denom, self.token
            )));
        }
        if self.max_supply.is_negative() {
            return Err(BondError::InvalidMaxSupply(self.max_supply.to_string()));
        }

        self.supply()?;
        Ok(())
    }

    fn validate_reserve_tokens(&self) -> BondResult<()> {
        let count = self.reserve_tokens.len();
        let rule = self.function_type.reserve_tokens();
        if !rule.accepts(count) {
            let expected = match rule {
                ReserveTokenCount::Exactly(n) => n,
                ReserveTokenCount::Any => 1,
            };
            return Err(BondError::IncorrectReserveTokenCount {
                expected,
                actual: count,
            });
        }

        if self.reserve_tokens.windows(2).any(|w| w[0] >= w[1]) {
            return Err(BondError::ReserveTokensNotSorted);
        }
        Ok(())
    }

    fn validate_fees(&self) -> BondResult<()> {
        if self.tx_fee_percentage < Decimal::ZERO {
            return Err(BondError::NegativeArgument("TxFeePercentage".to_string()));
        }
        if self.exit_fee_percentage < Decimal::ZERO {
            return Err(BondError::NegativeArgument("ExitFeePercentage".to_string()));
        }
        let total = self
            .tx_fee_percentage
            .checked_add(self.exit_fee_percentage)
            .ok_or_else(|| BondError::overflow("fee percentages"))?;
        if total >= Decimal::ONE_HUNDRED {
            return Err(BondError::FeesTooHigh {
                tx: self.tx_fee_percentage,
                exit: self.exit_fee_percentage,
            });
        }
        Ok(())
    }

    /// One coin per reserve token, each carrying `amount`
    pub fn new_reserve_coins(&self, amount: Decimal) -> BondResult<Coins> {
        Coins::new(
            self.reserve_tokens
                .iter()
                .map(|denom| Coin::new(denom.clone(), amount))
                .collect(),
        )
    }

    /// True if `denom` is one of this bond's reserve tokens
    pub fn is_reserve_token(&self, denom: &str) -> bool {
        self.reserve_tokens.iter().any(|r| r == denom)
    }
}
