//! Parameter subspace
//!
//! Params are owned and changed by governance outside this module; the
//! keeper only reads them (tests and genesis also write them).

use crate::keeper::keeper::Keeper;
use crate::store::KvStore;
use crate::supply::SupplyKeeper;
use crate::types::{Coins, Params};

/// Capability for reading and writing module parameters
pub trait ParamsStore {
    fn get_params(&self) -> Params;
    fn set_params(&mut self, params: Params);
}

/// In-memory parameter subspace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSubspace {
    params: Params,
}

impl ParamSubspace {
    pub fn new(params: Params) -> Self {
        Self { params }
    }
}

impl ParamsStore for ParamSubspace {
    fn get_params(&self) -> Params {
        self.params.clone()
    }

    fn set_params(&mut self, params: Params) {
        self.params = params;
    }
}

impl<S, B, P> Keeper<S, B, P>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    pub fn get_params(&self) -> Params {
        self.params.get_params()
    }

    pub fn set_params(&mut self, params: Params) {
        log::info!(
            "Asset params updated: max_decimal={} issue_fee={} mint_fee={}",
            params.max_decimal,
            params.issue_fee,
            params.mint_fee
        );
        self.params.set_params(params);
    }

    pub fn max_decimal(&self) -> i8 {
        self.params.get_params().max_decimal
    }

    pub fn issue_fee(&self) -> Coins {
        self.params.get_params().issue_fee
    }

    pub fn mint_fee(&self) -> Coins {
        self.params.get_params().mint_fee
    }
}
