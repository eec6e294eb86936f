//! Curve family registry
//!
//! Static lookup table mapping each curve family to its required parameter
//! names, reserve token count and extra parameter restriction. The table is a
//! `static`; nothing mutates it after compilation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::params::{power_parameter_restrictions, sigmoid_parameter_restrictions, ParamMap};
use crate::errors::{BondError, BondResult, InvariantViolation};

/// Closed set of curve families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionType {
    /// `price = m·x^n + c`
    #[serde(rename = "power_function")]
    Power,
    /// `price = a·((x−b)/√((x−b)²+c) + 1)`
    #[serde(rename = "sigmoid_function")]
    Sigmoid,
    /// Two-asset constant product pool
    #[serde(rename = "swapper_function")]
    Swapper,
    /// Augmented bonding curve (float formulas)
    #[serde(rename = "augmented_function")]
    Augmented,
}

/// Extra restriction run after the generic parameter checks
pub type ParamRestriction = fn(&ParamMap) -> BondResult<()>;

/// How many reserve tokens a family accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveTokenCount {
    /// Any non-zero number; all reserves move in lockstep
    Any,
    /// Exactly this many
    Exactly(usize),
}

impl ReserveTokenCount {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            ReserveTokenCount::Any => count > 0,
            ReserveTokenCount::Exactly(n) => *n == count,
        }
    }
}

/// Registry entry for a curve family
#[derive(Debug)]
pub struct FunctionSpec {
    pub function_type: FunctionType,
    pub required_params: &'static [&'static str],
    pub reserve_tokens: ReserveTokenCount,
    pub extra_restrictions: Option<ParamRestriction>,
}

static FUNCTION_SPECS: [FunctionSpec; 4] = [
    FunctionSpec {
        function_type: FunctionType::Power,
        required_params: &["m", "n", "c"],
        reserve_tokens: ReserveTokenCount::Any,
        extra_restrictions: Some(power_parameter_restrictions),
    },
    FunctionSpec {
        function_type: FunctionType::Sigmoid,
        required_params: &["a", "b", "c"],
        reserve_tokens: ReserveTokenCount::Any,
        extra_restrictions: Some(sigmoid_parameter_restrictions),
    },
    FunctionSpec {
        function_type: FunctionType::Swapper,
        required_params: &[],
        reserve_tokens: ReserveTokenCount::Exactly(2),
        extra_restrictions: None,
    },
    FunctionSpec {
        function_type: FunctionType::Augmented,
        required_params: &["d0", "p0", "theta", "kappa"],
        reserve_tokens: ReserveTokenCount::Any,
        extra_restrictions: None,
    },
];

impl FunctionType {
    pub const ALL: [FunctionType; 4] = [
        FunctionType::Power,
        FunctionType::Sigmoid,
        FunctionType::Swapper,
        FunctionType::Augmented,
    ];

    /// Registry entry for this family
    pub fn spec(self) -> &'static FunctionSpec {
        match self {
            FunctionType::Power => &FUNCTION_SPECS[0],
            FunctionType::Sigmoid => &FUNCTION_SPECS[1],
            FunctionType::Swapper => &FUNCTION_SPECS[2],
            FunctionType::Augmented => &FUNCTION_SPECS[3],
        }
    }

    pub fn required_params(self) -> &'static [&'static str] {
        self.spec().required_params
    }

    pub fn reserve_tokens(self) -> ReserveTokenCount {
        self.spec().reserve_tokens
    }

    pub fn extra_restrictions(self) -> Option<ParamRestriction> {
        self.spec().extra_restrictions
    }

    /// Families whose reserves all move by the same amount
    pub fn has_lockstep_reserves(self) -> bool {
        !matches!(self, FunctionType::Swapper)
    }

    /// Canonical tag
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionType::Power => "power_function",
            FunctionType::Sigmoid => "sigmoid_function",
            FunctionType::Swapper => "swapper_function",
            FunctionType::Augmented => "augmented_function",
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FunctionType {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvariantViolation::UnrecognizedFunctionType(s.to_string()).into())
    }
}
