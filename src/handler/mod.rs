//! State transitions of the asset module
//!
//! - `msg`: delivery of Issue / Mint / DelayedTransfer messages
//! - `end_block`: release of matured delayed transfers at block end

pub mod end_block;
pub mod msg;

pub use end_block::{end_blocker, EndBlockReport};
pub use msg::deliver;

use crate::error::AssetError;
use crate::types::AssetEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Height and time of the block being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    pub height: i64,
    pub time: DateTime<Utc>,
}

impl BlockContext {
    pub fn new(height: i64, time: DateTime<Utc>) -> Self {
        Self { height, time }
    }

    /// Block time in unix seconds
    pub fn unix_time(&self) -> i64 {
        self.time.timestamp()
    }
}

/// Outcome of delivering one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    /// 0 on success, otherwise the error code within `codespace`
    pub code: u32,
    pub codespace: String,
    pub log: String,
    pub data: Vec<u8>,
    pub events: Vec<AssetEvent>,
}

impl TxResult {
    pub fn ok(data: Vec<u8>, events: Vec<AssetEvent>) -> Self {
        Self {
            code: 0,
            codespace: String::new(),
            log: String::new(),
            data,
            events,
        }
    }

    pub fn rejected(err: &AssetError) -> Self {
        Self {
            code: err.code(),
            codespace: err.codespace().to_string(),
            log: err.to_string(),
            data: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}
