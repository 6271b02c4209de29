//! Storage layer
//!
//! - `kv`: ordered key-value store interface and in-memory implementation
//! - `keys`: byte layout of every stored key
//! - `codec`: length-prefixed binary encoding of stored records

pub mod codec;
pub mod keys;
pub mod kv;

pub use codec::{decode_record, encode_record};
pub use kv::{KvPair, KvStore, MemStore};
