//! Curve families and their parameter sets
//!
//! - `registry`: the closed set of families and the static table describing them
//! - `params`: parameter sets and their validation against the table

pub mod params;
pub mod registry;

pub use params::{FunctionParam, FunctionParams, ParamMap};
pub use registry::{FunctionSpec, FunctionType, ParamRestriction, ReserveTokenCount};
