//! Asset module messages
//!
//! The message set is closed: every variant of [`AssetMsg`] is handled by an
//! exhaustive match in the handler.

use crate::error::AssetError;
use crate::types::address::Address;
use crate::types::coin::Coins;
use crate::types::token::{
    validate_description, validate_name, validate_symbol, validate_total_supply, MAX_SUPPLY,
};
use serde::{Deserialize, Serialize};

/// Route of every asset message
pub const ROUTER_KEY: &str = "asset";

pub const ISSUE_MSG_TYPE: &str = "issueMsg";
pub const MINT_MSG_TYPE: &str = "mintMsg";
pub const DELAYED_TRANSFER_MSG_TYPE: &str = "delayedTransferMsg";

/// Issue a new token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMsg {
    pub from: Address,
    pub name: String,
    pub symbol: String,
    pub total_supply: i64,
    pub mintable: bool,
    pub decimals: i8,
    pub description: String,
}

impl IssueMsg {
    pub fn new(
        from: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        total_supply: i64,
        mintable: bool,
        decimals: i8,
        description: impl Into<String>,
    ) -> Self {
        Self {
            from,
            name: name.into(),
            symbol: symbol.into(),
            total_supply,
            mintable,
            decimals,
            description: description.into(),
        }
    }

    pub fn validate_basic(&self) -> Result<(), AssetError> {
        validate_name(&self.name)?;
        validate_symbol(&self.symbol)?;
        validate_total_supply(self.total_supply)?;

        if self.decimals < 0 {
            return Err(AssetError::InvalidDecimal(format!(
                "token decimal {} is negative",
                self.decimals
            )));
        }

        validate_description(&self.description)
    }
}

/// Mint more of an existing token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintMsg {
    pub from: Address,
    pub symbol: String,
    pub amount: i64,
}

impl MintMsg {
    pub fn new(from: Address, symbol: impl Into<String>, amount: i64) -> Self {
        Self {
            from,
            symbol: symbol.into(),
            amount,
        }
    }

    pub fn validate_basic(&self) -> Result<(), AssetError> {
        validate_symbol(&self.symbol)?;

        if self.amount <= 0 || self.amount > MAX_SUPPLY {
            return Err(AssetError::InvalidMintAmount(format!(
                "mint amount should be in (0, {}]",
                MAX_SUPPLY
            )));
        }
        Ok(())
    }
}

/// Escrow coins now, release them to `to` after `delayed_period` seconds
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedTransferMsg {
    pub from: Address,
    pub to: Address,
    pub amount: Coins,
    pub delayed_period: i64,
}

impl DelayedTransferMsg {
    pub fn new(from: Address, to: Address, amount: Coins, delayed_period: i64) -> Self {
        Self {
            from,
            to,
            amount,
            delayed_period,
        }
    }

    pub fn validate_basic(&self) -> Result<(), AssetError> {
        if self.amount.is_empty() || !self.amount.is_valid() {
            return Err(AssetError::InvalidCoins(format!(
                "delayed transfer amount {} is not a valid coin set",
                self.amount
            )));
        }
        Ok(())
    }
}

/// Every message the asset handler accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AssetMsg {
    Issue(IssueMsg),
    Mint(MintMsg),
    DelayedTransfer(DelayedTransferMsg),
}

impl AssetMsg {
    pub fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    pub fn msg_type(&self) -> &'static str {
        match self {
            AssetMsg::Issue(_) => ISSUE_MSG_TYPE,
            AssetMsg::Mint(_) => MINT_MSG_TYPE,
            AssetMsg::DelayedTransfer(_) => DELAYED_TRANSFER_MSG_TYPE,
        }
    }

    /// Account that must have signed the message
    pub fn signer(&self) -> &Address {
        match self {
            AssetMsg::Issue(msg) => &msg.from,
            AssetMsg::Mint(msg) => &msg.from,
            AssetMsg::DelayedTransfer(msg) => &msg.from,
        }
    }

    /// Stateless checks, run before any store lookup
    pub fn validate_basic(&self) -> Result<(), AssetError> {
        match self {
            AssetMsg::Issue(msg) => msg.validate_basic(),
            AssetMsg::Mint(msg) => msg.validate_basic(),
            AssetMsg::DelayedTransfer(msg) => msg.validate_basic(),
        }
    }
}

impl From<IssueMsg> for AssetMsg {
    fn from(msg: IssueMsg) -> Self {
        AssetMsg::Issue(msg)
    }
}

impl From<MintMsg> for AssetMsg {
    fn from(msg: MintMsg) -> Self {
        AssetMsg::Mint(msg)
    }
}

impl From<DelayedTransferMsg> for AssetMsg {
    fn from(msg: DelayedTransferMsg) -> Self {
        AssetMsg::DelayedTransfer(msg)
    }
}
