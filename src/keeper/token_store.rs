//! Token store: symbol -> token record

use crate::error::Fatal;
use crate::keeper::keeper::Keeper;
use crate::keeper::params::ParamsStore;
use crate::store::keys::{token_key, TOKEN_KEY_PREFIX};
use crate::store::{decode_record, encode_record, KvStore};
use crate::supply::SupplyKeeper;
use crate::types::Token;

impl<S, B, P> Keeper<S, B, P>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    /// Store a new token. Callers check `is_token_exist` first, so an
    /// existing symbol here means a broken invariant.
    pub fn set_token(&mut self, token: &Token) -> Result<(), Fatal> {
        let key = token_key(&token.symbol);
        if self.store.has(&key) {
            return Err(Fatal::DuplicateSymbol(token.symbol.clone()));
        }
        let bytes = encode_record(token)?;
        self.store.set(&key, &bytes);
        Ok(())
    }

    /// Overwrite an existing token
    pub fn update_token(&mut self, token: &Token) -> Result<(), Fatal> {
        let key = token_key(&token.symbol);
        if !self.store.has(&key) {
            return Err(Fatal::TokenNotFound(token.symbol.clone()));
        }
        let bytes = encode_record(token)?;
        self.store.set(&key, &bytes);
        Ok(())
    }

    pub fn get_token(&self, symbol: &str) -> Result<Option<Token>, Fatal> {
        let key = token_key(symbol);
        self.store
            .get(&key)
            .map(|bytes| decode_record(&key, &bytes))
            .transpose()
    }

    pub fn is_token_exist(&self, symbol: &str) -> bool {
        self.store.has(&token_key(symbol))
    }

    /// All tokens, ascending by symbol
    pub fn list_tokens(&self) -> Result<Vec<Token>, Fatal> {
        self.token_iter().collect()
    }

    /// Lazily decoded tokens, ascending by symbol
    pub(crate) fn token_iter(&self) -> impl Iterator<Item = Result<Token, Fatal>> + '_ {
        self.store
            .prefix_iter(&[TOKEN_KEY_PREFIX])
            .map(|(key, value)| decode_record(key, value))
    }
}
