//! Supply capability
//!
//! The ledger never moves balances itself. Fee collection, escrow, minting
//! and release all go through a [`SupplyKeeper`] provided by the host
//! application, which owns account balances and global supply accounting.

use crate::error::CODE_INVALID_COINS;
use crate::types::{Address, Coins};
use thiserror::Error;

/// Module name; also names the custody account holding escrowed transfers
pub const MODULE_NAME: &str = "asset";

/// Module account collecting issue and mint fees
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

// SDK codespace codes surfaced by the supply capability
pub const CODE_INSUFFICIENT_COINS: u32 = 10;
pub const CODE_UNKNOWN_MODULE: u32 = 9;
pub const CODE_UNAUTHORIZED: u32 = 4;

/// Errors reported by the supply capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupplyError {
    #[error("insufficient account funds; {have} < {need}")]
    InsufficientCoins { have: Coins, need: Coins },
    #[error("module account {0} does not exist")]
    UnknownModule(String),
    #[error("module account {0} does not have permissions to mint tokens")]
    Unauthorized(String),
    #[error("invalid coins: {0}")]
    InvalidCoins(String),
}

impl SupplyError {
    pub fn code(&self) -> u32 {
        match self {
            SupplyError::InsufficientCoins { .. } => CODE_INSUFFICIENT_COINS,
            SupplyError::UnknownModule(_) => CODE_UNKNOWN_MODULE,
            SupplyError::Unauthorized(_) => CODE_UNAUTHORIZED,
            SupplyError::InvalidCoins(_) => CODE_INVALID_COINS,
        }
    }
}

/// Capability for moving and minting coins
///
/// Implementations must be deterministic: the same sequence of calls on the
/// same state must produce the same results on every validator.
pub trait SupplyKeeper {
    /// Move coins from a user account into a named module account
    fn send_coins_from_account_to_module(
        &mut self,
        from: &Address,
        module: &str,
        amount: &Coins,
    ) -> Result<(), SupplyError>;

    /// Move coins out of a named module account to a user account
    fn send_coins_from_module_to_account(
        &mut self,
        module: &str,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), SupplyError>;

    /// Create new coins in a module account and account for them in total supply
    fn mint_coins(&mut self, module: &str, amount: &Coins) -> Result<(), SupplyError>;
}
