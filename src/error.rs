//! Error types
//!
//! Two classes of failure:
//! - [`AssetError`]: a message was rejected. Carries a stable codespace and
//!   code, never halts block processing.
//! - [`Fatal`]: stored state violates an invariant. The enclosing block must
//!   be aborted; these are never reported to users as rejections.

use crate::supply::SupplyError;
use crate::types::Address;
use thiserror::Error;

/// Codespace of errors defined by this module
pub const CODESPACE_ASSET: &str = "asset";

/// Codespace of generic SDK errors (addresses, coins, routing)
pub const CODESPACE_SDK: &str = "sdk";

// SDK codespace codes
pub const CODE_UNKNOWN_REQUEST: u32 = 6;
pub const CODE_INVALID_ADDRESS: u32 = 7;
pub const CODE_INVALID_COINS: u32 = 11;

// Asset codespace codes
pub const CODE_INVALID_TOKEN_NAME: u32 = 101;
pub const CODE_INVALID_TOKEN_SYMBOL: u32 = 102;
pub const CODE_INVALID_TOTAL_SUPPLY: u32 = 103;
pub const CODE_INVALID_DECIMAL: u32 = 104;
pub const CODE_INVALID_MINT_AMOUNT: u32 = 105;
pub const CODE_INVALID_TOKEN_DESCRIPTION: u32 = 106;
pub const CODE_NOT_MINTABLE_TOKEN: u32 = 107;
pub const CODE_UNAUTHORIZED_MINT: u32 = 108;
pub const CODE_DUPLICATE_SYMBOL: u32 = 109;
pub const CODE_TOKEN_NOT_FOUND: u32 = 110;
pub const CODE_INVALID_DELAY: u32 = 111;
pub const CODE_DELAYED_TRANSFER_NOT_FOUND: u32 = 112;

/// Recoverable rejection of a message or query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Invalid token name: {0}")]
    InvalidTokenName(String),
    #[error("Invalid token symbol: {0}")]
    InvalidTokenSymbol(String),
    #[error("Invalid total supply: {0}")]
    InvalidTotalSupply(String),
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),
    #[error("Invalid mint amount: {0}")]
    InvalidMintAmount(String),
    #[error("Invalid token description: {0}")]
    InvalidTokenDescription(String),
    #[error("Token {0} is not mintable")]
    NotMintableToken(String),
    #[error("Only {owner} is authorized to mint token {symbol}")]
    UnauthorizedMint { symbol: String, owner: Address },
    #[error("Duplicated token symbol: {0}")]
    DuplicateSymbol(String),
    #[error("Token {0} does not exist")]
    TokenNotFound(String),
    #[error("Invalid delay: {0}")]
    InvalidDelay(String),
    #[error("Delayed transfer with sequence {0} does not exist")]
    DelayedTransferNotFound(i64),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid coins: {0}")]
    InvalidCoins(String),
    #[error("Unknown request: {0}")]
    UnknownRequest(String),
    #[error(transparent)]
    Supply(#[from] SupplyError),
}

impl AssetError {
    /// Stable numeric code reported to clients
    pub fn code(&self) -> u32 {
        match self {
            AssetError::InvalidTokenName(_) => CODE_INVALID_TOKEN_NAME,
            AssetError::InvalidTokenSymbol(_) => CODE_INVALID_TOKEN_SYMBOL,
            AssetError::InvalidTotalSupply(_) => CODE_INVALID_TOTAL_SUPPLY,
            AssetError::InvalidDecimal(_) => CODE_INVALID_DECIMAL,
            AssetError::InvalidMintAmount(_) => CODE_INVALID_MINT_AMOUNT,
            AssetError::InvalidTokenDescription(_) => CODE_INVALID_TOKEN_DESCRIPTION,
            AssetError::NotMintableToken(_) => CODE_NOT_MINTABLE_TOKEN,
            AssetError::UnauthorizedMint { .. } => CODE_UNAUTHORIZED_MINT,
            AssetError::DuplicateSymbol(_) => CODE_DUPLICATE_SYMBOL,
            AssetError::TokenNotFound(_) => CODE_TOKEN_NOT_FOUND,
            AssetError::InvalidDelay(_) => CODE_INVALID_DELAY,
            AssetError::DelayedTransferNotFound(_) => CODE_DELAYED_TRANSFER_NOT_FOUND,
            AssetError::InvalidAddress(_) => CODE_INVALID_ADDRESS,
            AssetError::InvalidCoins(_) => CODE_INVALID_COINS,
            AssetError::UnknownRequest(_) => CODE_UNKNOWN_REQUEST,
            AssetError::Supply(err) => err.code(),
        }
    }

    pub fn codespace(&self) -> &'static str {
        match self {
            AssetError::InvalidAddress(_)
            | AssetError::InvalidCoins(_)
            | AssetError::UnknownRequest(_)
            | AssetError::Supply(_) => CODESPACE_SDK,
            _ => CODESPACE_ASSET,
        }
    }
}

/// Invariant violation in stored state. Never recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fatal {
    #[error("duplicated token symbol: {0}")]
    DuplicateSymbol(String),
    #[error("token {0} does not exist")]
    TokenNotFound(String),
    #[error("duplicated delayed transfer sequence: {0}")]
    DuplicateSequence(i64),
    #[error("delayed transfer {0} is missing from the primary index")]
    MissingRecord(i64),
    #[error("index mismatch for delayed transfer {sequence}: {detail}")]
    IndexMismatch { sequence: i64, detail: String },
    #[error("corrupted record under key {key}: {reason}")]
    Decode { key: String, reason: String },
    #[error("failed to encode record: {0}")]
    Encode(String),
    #[error("invalid genesis state: {0}")]
    InvalidGenesis(String),
}

/// Error of a state transition: either a rejection or a fatal fault
#[derive(Error, Debug)]
pub(crate) enum HandlerError {
    #[error(transparent)]
    Rejected(#[from] AssetError),
    #[error(transparent)]
    Fatal(#[from] Fatal),
}

impl From<SupplyError> for HandlerError {
    fn from(err: SupplyError) -> Self {
        HandlerError::Rejected(AssetError::Supply(err))
    }
}

/// Error of a routed query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Request(#[from] AssetError),
    #[error(transparent)]
    Fatal(#[from] Fatal),
    #[error("failed to serialize query result: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryError {
    /// Fatal store errors must never be swallowed as query failures
    pub fn is_fatal(&self) -> bool {
        matches!(self, QueryError::Fatal(_))
    }
}
