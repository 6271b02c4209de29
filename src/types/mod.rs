//! Asset module data types
//!
//! - Addresses and coin sets
//! - Token and delayed transfer records
//! - Messages, events and module parameters

pub mod address;
pub mod coin;
pub mod delayed_transfer;
pub mod events;
pub mod msgs;
pub mod params;
pub mod token;

pub use address::{Address, AddressError, ADDR_LEN};
pub use coin::{Coin, Coins, NATIVE_DENOM};
pub use delayed_transfer::DelayedTransfer;
pub use events::AssetEvent;
pub use msgs::{AssetMsg, DelayedTransferMsg, IssueMsg, MintMsg, ROUTER_KEY};
pub use params::Params;
pub use token::{Token, MAX_SUPPLY};
