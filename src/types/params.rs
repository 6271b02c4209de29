//! Module parameters

use crate::error::AssetError;
use crate::types::coin::{Coins, NATIVE_DENOM};
use serde::{Deserialize, Serialize};

/// Default maximum decimal places of an issued token
pub const DEFAULT_MAX_DECIMAL: i8 = 10;

/// Default fee for issuing a token, in native denom
pub const DEFAULT_ISSUE_FEE: u128 = 1_000_000_000;

/// Default fee for minting, in native denom
pub const DEFAULT_MINT_FEE: u128 = 100_000_000;

/// Governance-controlled parameters of the asset module
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    #[serde(rename = "param_max_decimal")]
    pub max_decimal: i8,
    pub issue_fee: Coins,
    pub mint_fee: Coins,
}

impl Params {
    pub fn new(max_decimal: i8, issue_fee: Coins, mint_fee: Coins) -> Self {
        Self {
            max_decimal,
            issue_fee,
            mint_fee,
        }
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        if self.max_decimal < 0 {
            return Err(AssetError::InvalidDecimal(format!(
                "max decimal {} is negative",
                self.max_decimal
            )));
        }
        if !self.issue_fee.is_valid() {
            return Err(AssetError::InvalidCoins(format!(
                "invalid issue fee {}",
                self.issue_fee
            )));
        }
        if !self.mint_fee.is_valid() {
            return Err(AssetError::InvalidCoins(format!(
                "invalid mint fee {}",
                self.mint_fee
            )));
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_decimal: DEFAULT_MAX_DECIMAL,
            issue_fee: Coins::single(NATIVE_DENOM, DEFAULT_ISSUE_FEE),
            mint_fee: Coins::single(NATIVE_DENOM, DEFAULT_MINT_FEE),
        }
    }
}
