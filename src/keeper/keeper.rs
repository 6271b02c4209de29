//! Asset keeper
//!
//! Owns the module's key-value store together with handles to the external
//! supply and params capabilities. Store operations are split across
//! `token_store`, `delayed_store`, `querier` and `genesis`.

use crate::config::KeeperConfig;
use crate::keeper::params::ParamsStore;
use crate::store::KvStore;
use crate::supply::SupplyKeeper;

/// The asset module keeper
#[derive(Debug)]
pub struct Keeper<S, B, P> {
    pub(crate) store: S,
    pub(crate) supply: B,
    pub(crate) params: P,
    config: KeeperConfig,
}

impl<S, B, P> Keeper<S, B, P>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    pub fn new(store: S, supply: B, params: P, config: KeeperConfig) -> Self {
        Self {
            store,
            supply,
            params,
            config,
        }
    }

    /// Read-only view of the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn supply(&self) -> &B {
        &self.supply
    }

    pub fn supply_mut(&mut self) -> &mut B {
        &mut self.supply
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }
}
