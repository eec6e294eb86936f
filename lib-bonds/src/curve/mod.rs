//! Curve evaluation
//!
//! - `formula`: typed `Curve` payloads with spot price and integral
//! - `augmented`: float formulas backing the Augmented family

pub mod augmented;
pub mod formula;

pub use formula::Curve;
