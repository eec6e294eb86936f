//! Function parameter sets
//!
//! A parameter set is an ordered list of `(name, value)` pairs. Validation
//! checks it against the registry entry of a curve family.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::registry::FunctionType;
use crate::decimal;
use crate::errors::{BondError, BondResult};

/// Name → value view of a parameter set
pub type ParamMap = BTreeMap<String, Decimal>;

/// A single named curve parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParam {
    pub param: String,
    pub value: Decimal,
}

impl FunctionParam {
    pub fn new(param: impl Into<String>, value: Decimal) -> Self {
        Self {
            param: param.into(),
            value,
        }
    }
}

/// Ordered curve parameter set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionParams(pub Vec<FunctionParam>);

impl FunctionParams {
    pub fn new(params: Vec<FunctionParam>) -> Self {
        Self(params)
    }

    /// Convenience constructor from `(name, value)` pairs
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, Decimal)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(name, value)| FunctionParam::new(name, value))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionParam> {
        self.0.iter()
    }

    /// Name → value mapping; a later duplicate overrides an earlier one
    pub fn as_map(&self) -> ParamMap {
        self.0
            .iter()
            .map(|p| (p.param.clone(), p.value))
            .collect()
    }

    /// First name that appears more than once, if any
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .map(|p| p.param.as_str())
            .find(|name| !seen.insert(*name))
    }

    /// Validate against the registry entry of `function_type`.
    ///
    /// Duplicate names are tolerated as long as count and presence checks
    /// pass; see [`FunctionParams::validate_strict`].
    pub fn validate(&self, function_type: FunctionType) -> BondResult<()> {
        let expected = function_type.required_params();

        if self.len() != expected.len() {
            return Err(BondError::WrongParameterCount {
                expected: expected.len(),
                actual: self.len(),
            });
        }

        let params = self.as_map();
        for name in expected {
            match params.get(*name) {
                None => return Err(BondError::ParameterMissing(name.to_string())),
                Some(value) if *value < Decimal::ZERO => {
                    return Err(BondError::NegativeArgument(format!("FunctionParams:{}", name)))
                }
                Some(_) => {}
            }
        }

        if let Some(restriction) = function_type.extra_restrictions() {
            restriction(&params)?;
        }

        Ok(())
    }

    /// Like [`FunctionParams::validate`], but duplicate names fail first
    pub fn validate_strict(&self, function_type: FunctionType) -> BondResult<()> {
        if let Some(name) = self.first_duplicate() {
            return Err(BondError::DuplicateParameter(name.to_string()));
        }
        self.validate(function_type)
    }
}

impl fmt::Display for FunctionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl From<Vec<FunctionParam>> for FunctionParams {
    fn from(params: Vec<FunctionParam>) -> Self {
        Self(params)
    }
}

/// Look up a parameter that validation has already guaranteed
pub(crate) fn required(params: &ParamMap, name: &str) -> BondResult<Decimal> {
    params
        .get(name)
        .copied()
        .ok_or_else(|| BondError::ParameterMissing(name.to_string()))
}

/// `n` must be integral so `x^n` is a repeated product
pub(crate) fn power_parameter_restrictions(params: &ParamMap) -> BondResult<()> {
    let n = required(params, "n")?;
    if !decimal::is_integer(n) {
        return Err(BondError::ArgumentMustBeInteger("FunctionParams:n".to_string()));
    }
    Ok(())
}

/// `c` must be positive, otherwise `√((x−b)²+c)` can be zero
pub(crate) fn sigmoid_parameter_restrictions(params: &ParamMap) -> BondResult<()> {
    let c = required(params, "c")?;
    if c <= Decimal::ZERO {
        return Err(BondError::ArgumentMustBePositive("FunctionParams:c".to_string()));
    }
    Ok(())
}
