//! Events emitted by the asset module

use crate::types::address::Address;
use crate::types::coin::Coins;
use serde::{Deserialize, Serialize};

pub const EVENT_TYPE_ISSUE_TOKEN: &str = "issue_token";
pub const EVENT_TYPE_MINT_TOKEN: &str = "mint_token";
pub const EVENT_TYPE_DELAYED_TRANSFER: &str = "delayed_transfer";
pub const EVENT_TYPE_RELEASE_DELAYED_TRANSFER: &str = "release_delayed_transfer";

/// An event produced by a message or by the block-end scheduler
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetEvent {
    /// New token issued; `minted` is the initial supply delivered to the owner
    IssueToken {
        symbol: String,
        owner: Address,
        minted: Coins,
    },
    /// Additional supply minted by the owner
    MintToken {
        symbol: String,
        owner: Address,
        minted: Coins,
    },
    /// Coins escrowed for a future release
    DelayedTransfer {
        sequence: i64,
        from: Address,
        to: Address,
        amount: Coins,
        matured_time: i64,
    },
    /// Escrowed coins delivered to the recipient
    ReleaseDelayedTransfer {
        sequence: i64,
        to: Address,
        amount: Coins,
    },
}

impl AssetEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            AssetEvent::IssueToken { .. } => EVENT_TYPE_ISSUE_TOKEN,
            AssetEvent::MintToken { .. } => EVENT_TYPE_MINT_TOKEN,
            AssetEvent::DelayedTransfer { .. } => EVENT_TYPE_DELAYED_TRANSFER,
            AssetEvent::ReleaseDelayedTransfer { .. } => EVENT_TYPE_RELEASE_DELAYED_TRANSFER,
        }
    }
}
