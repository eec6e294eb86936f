//! Bond Engine Errors
//!
//! Two tiers: recoverable validation failures that callers handle, and fatal
//! invariant violations (`BondError::Invariant`) that must abort the current
//! state transition.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::function::FunctionType;

/// Error during bond validation or pricing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BondError {
    #[error("Incorrect number of function parameters: expected {expected}, got {actual}")]
    WrongParameterCount { expected: usize, actual: usize },

    #[error("Function parameter missing: {0}")]
    ParameterMissing(String),

    #[error("Duplicate function parameter: {0}")]
    DuplicateParameter(String),

    #[error("Argument cannot be negative: {0}")]
    NegativeArgument(String),

    #[error("Argument must be an integer: {0}")]
    ArgumentMustBeInteger(String),

    #[error("Argument must be positive: {0}")]
    ArgumentMustBePositive(String),

    #[error("Function not available for function type {0}")]
    FunctionNotAvailable(FunctionType),

    #[error("Function requires non-zero current supply")]
    RequiresNonZeroSupply,

    #[error("Token is not a valid reserve token: {0}")]
    InvalidReserveToken(String),

    #[error("Incorrect number of reserve tokens: expected {expected}, got {actual}")]
    IncorrectReserveTokenCount { expected: usize, actual: usize },

    #[error("Reserve tokens must be sorted and unique")]
    ReserveTokensNotSorted,

    #[error("Duplicate denomination: {0}")]
    DuplicateDenomination(String),

    #[error("Order quantity limits must be sorted, unique and non-negative")]
    OrderQuantityLimitsInvalid,

    #[error("Swap of {from} to {to} is too small to give any return")]
    SwapTooSmall { from: String, to: String },

    #[error("Swap of {from} to {to} would deplete the {to} reserve")]
    ReserveDepletion { from: String, to: String },

    #[error("Invalid function parameter format: {0}")]
    InvalidParameterFormat(String),

    #[error("Fee percentages must add up to less than 100: tx {tx}, exit {exit}")]
    FeesTooHigh { tx: Decimal, exit: Decimal },

    #[error("Invalid max supply: {0}")]
    InvalidMaxSupply(String),

    #[error("Cannot mint more than max supply: max {max}, would have {would_have}")]
    MaxSupplyExceeded { max: Decimal, would_have: Decimal },

    #[error("Bond does not allow sells")]
    SellsNotAllowed,

    #[error("Cannot burn {burn} from a supply of {supply}")]
    InsufficientSupply { supply: Decimal, burn: Decimal },

    #[error("Reserve balances are not uniform: {0}")]
    NonUniformReserves(String),

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invariant violated: {0}")]
    Invariant(InvariantViolation),
}

impl BondError {
    /// True for invariant violations, which callers must not retry or mask
    pub fn is_fatal(&self) -> bool {
        matches!(self, BondError::Invariant(_))
    }

    pub(crate) fn overflow(operation: &str) -> Self {
        BondError::ArithmeticOverflow(operation.to_string())
    }
}

/// Conditions that are unreachable for a correctly configured and maintained bond
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("negative price result for bond {bond}")]
    NegativePrice { bond: String },

    #[error("negative integral result for bond {bond}")]
    NegativeIntegral { bond: String },

    #[error("negative reserve delta result for bond {bond}")]
    NegativeReserveDelta { bond: String },

    #[error("negative return for swap result for bond {bond}")]
    NegativeSwapReturn { bond: String },

    #[error("not enough reserve available for burn: required {required}, available {available}")]
    InsufficientReserveForBurn { required: Decimal, available: Decimal },

    #[error("negative current supply for bond {bond}")]
    NegativeSupply { bond: String },

    #[error("curve integral is undefined for function type {0}")]
    UndefinedIntegral(FunctionType),

    #[error("unrecognized function type: {0}")]
    UnrecognizedFunctionType(String),
}

impl From<InvariantViolation> for BondError {
    fn from(violation: InvariantViolation) -> Self {
        tracing::error!("Bond invariant violated: {}", violation);
        BondError::Invariant(violation)
    }
}

/// Result type for bond operations
pub type BondResult<T> = Result<T, BondError>;
