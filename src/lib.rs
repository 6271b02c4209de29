//! Asset Ledger: the state-transition core of a token issuance module
//!
//! This crate provides the deterministic keeper of an application-chain
//! asset module:
//! - Token issuance with fees and a global supply cap
//! - Owner-controlled minting
//! - Escrowed delayed transfers with a four-way index
//! - Block-end release of matured transfers in `(time, sequence)` order
//! - Paginated JSON queries and genesis import/export
//!
//! # Example
//!
//! ```ignore
//! use asset_ledger::handler::{deliver, end_blocker, BlockContext};
//! use asset_ledger::keeper::{Keeper, ParamSubspace};
//! use asset_ledger::store::MemStore;
//! use asset_ledger::types::{Coins, DelayedTransferMsg};
//! use asset_ledger::KeeperConfig;
//!
//! // `bank` is the host application's SupplyKeeper
//! let mut keeper = Keeper::new(MemStore::new(), bank, ParamSubspace::default(), KeeperConfig::default());
//!
//! let msg = DelayedTransferMsg::new(alice, bob, Coins::single("btc", 100), 3600);
//! let result = deliver(&mut keeper, &ctx, &msg.into())?;
//! assert!(result.is_ok());
//!
//! // At block end, release everything that has matured
//! let report = end_blocker(&mut keeper, &ctx)?;
//! println!("released {:?}", report.released);
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod keeper;
pub mod store;
pub mod supply;
pub mod types;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use config::KeeperConfig;
pub use error::{AssetError, Fatal, QueryError};
pub use handler::{deliver, end_blocker, BlockContext, EndBlockReport, TxResult};
pub use keeper::{validate_genesis, GenesisState, Keeper, PageRequest, ParamSubspace, ParamsStore};
pub use store::{KvStore, MemStore};
pub use supply::{SupplyError, SupplyKeeper};
pub use types::{
    Address, AssetEvent, AssetMsg, Coin, Coins, DelayedTransfer, DelayedTransferMsg, IssueMsg,
    MintMsg, Params, Token,
};
