//! Asset keeper: the module's state and every store operation on it
//!
//! - `token_store`: symbol -> token
//! - `delayed_store`: four-way indexed delayed transfers and the sequence counter
//! - `params`: parameter subspace access
//! - `querier`: paginated read-only queries and the JSON query router
//! - `genesis`: import and export of module state

pub mod delayed_store;
pub mod genesis;
pub mod keeper;
pub mod params;
pub mod querier;
pub mod token_store;

pub use genesis::{validate_genesis, GenesisState};
pub use keeper::Keeper;
pub use params::{ParamSubspace, ParamsStore};
pub use querier::PageRequest;
