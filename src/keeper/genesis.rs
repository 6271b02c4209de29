//! Genesis import and export

use crate::error::{AssetError, Fatal};
use crate::keeper::keeper::Keeper;
use crate::keeper::params::ParamsStore;
use crate::store::KvStore;
use crate::supply::SupplyKeeper;
use crate::types::{DelayedTransfer, Params, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Module state at chain start or export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    pub tokens: Vec<Token>,
    /// Outstanding escrows; their coins must already sit in module custody
    #[serde(default)]
    pub delayed_transfers: Vec<DelayedTransfer>,
}

impl GenesisState {
    pub fn new(params: Params, tokens: Vec<Token>) -> Self {
        Self {
            params,
            tokens,
            delayed_transfers: Vec::new(),
        }
    }
}

/// Check a genesis state before it is imported
pub fn validate_genesis(state: &GenesisState) -> Result<(), AssetError> {
    state.params.validate()?;

    let mut symbols = BTreeSet::new();
    for token in &state.tokens {
        token.validate()?;
        if token.decimal > state.params.max_decimal {
            return Err(AssetError::InvalidDecimal(format!(
                "token {} has decimal {} above the maximum {}",
                token.symbol, token.decimal, state.params.max_decimal
            )));
        }
        if !symbols.insert(token.symbol.as_str()) {
            return Err(AssetError::DuplicateSymbol(token.symbol.clone()));
        }
    }

    let mut sequences = BTreeSet::new();
    for transfer in &state.delayed_transfers {
        if transfer.sequence < 0 {
            return Err(AssetError::UnknownRequest(format!(
                "delayed transfer sequence {} is negative",
                transfer.sequence
            )));
        }
        if transfer.amount.is_empty() || !transfer.amount.is_valid() {
            return Err(AssetError::InvalidCoins(format!(
                "delayed transfer {} has invalid amount {}",
                transfer.sequence, transfer.amount
            )));
        }
        if !sequences.insert(transfer.sequence) {
            return Err(AssetError::UnknownRequest(format!(
                "duplicated delayed transfer sequence {}",
                transfer.sequence
            )));
        }
    }

    Ok(())
}

impl<S, B, P> Keeper<S, B, P>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    /// Load a genesis state into an empty store. An invalid state aborts
    /// chain start.
    pub fn init_genesis(&mut self, state: &GenesisState) -> Result<(), Fatal> {
        validate_genesis(state).map_err(|e| Fatal::InvalidGenesis(e.to_string()))?;

        self.set_params(state.params.clone());

        for token in &state.tokens {
            self.set_token(token)?;
        }
        for transfer in &state.delayed_transfers {
            self.insert_delayed_transfer(transfer)?;
        }

        log::info!(
            "Asset genesis loaded: {} tokens, {} delayed transfers",
            state.tokens.len(),
            state.delayed_transfers.len()
        );
        Ok(())
    }

    pub fn export_genesis(&self) -> Result<GenesisState, Fatal> {
        Ok(GenesisState {
            params: self.get_params(),
            tokens: self.list_tokens()?,
            delayed_transfers: self.list_delayed_transfers()?,
        })
    }
}
