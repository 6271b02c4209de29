//! Account addresses
//!
//! Fixed-width 20 byte account identifiers. Fixed width matters: addresses
//! are embedded in secondary index keys, so every address must encode to the
//! same length for prefix scans to stay unambiguous.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of an account address in bytes
pub const ADDR_LEN: usize = 20;

/// Address parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressError {
    #[error("address length should be 20, got {0}")]
    InvalidLength(usize),
    #[error("invalid hex address: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A 20 byte account address
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDR_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDR_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an address from a byte slice of exactly `ADDR_LEN` bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let array: [u8; ADDR_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }

    /// Derive an address from arbitrary seed bytes (first 20 bytes of SHA-256)
    pub fn derive(seed: &[u8]) -> Self {
        let digest = Sha256::digest(seed);
        let mut bytes = [0u8; ADDR_LEN];
        bytes.copy_from_slice(&digest[..ADDR_LEN]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim_start_matches("0x"))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", self.to_hex())
    }
}

/// Hex string in human readable formats (JSON), raw bytes otherwise
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let raw = String::deserialize(deserializer)?;
            raw.parse().map_err(de::Error::custom)
        } else {
            <[u8; ADDR_LEN]>::deserialize(deserializer).map(Self)
        }
    }
}
