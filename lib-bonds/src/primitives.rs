//! Identity primitives for bond configurations
//!
//! Creator, signers, reserve custody and fee recipient are opaque,
//! comparable 32-byte identities. The engine never interprets them beyond
//! equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::BondError;

/// Batch length in blocks (settlement cadence, not part of pricing)
pub type BatchBlocks = u64;

/// 32-byte account identity, hex encoded in text form
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Default)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Unset identity, used until a bond is given its own addresses
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Parses the hex form produced by `Display`, with or without a `0x` prefix
impl FromStr for Address {
    type Err = BondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))
            .map_err(|_| BondError::InvalidAddress(s.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| BondError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}
