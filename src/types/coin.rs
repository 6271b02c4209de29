//! Coins and coin sets
//!
//! A `Coins` value is kept in canonical form: sorted by denom, one entry per
//! denom, every amount strictly positive. Canonical form makes equality and
//! encoding deterministic across validators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Denom of the chain's native staking/fee coin
pub const NATIVE_DENOM: &str = "ubarkis";

/// A single denomination and amount
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins of distinct denominations
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Build a canonical coin set: zero amounts dropped, duplicate denoms
    /// merged. `None` if a merged amount overflows.
    pub fn try_new(coins: Vec<Coin>) -> Option<Self> {
        let mut merged: Vec<Coin> = Vec::with_capacity(coins.len());
        let mut sorted = coins;
        sorted.sort_by(|a, b| a.denom.cmp(&b.denom));

        for coin in sorted.into_iter().filter(|c| c.amount > 0) {
            match merged.last_mut() {
                Some(last) if last.denom == coin.denom => {
                    last.amount = last.amount.checked_add(coin.amount)?;
                }
                _ => merged.push(coin),
            }
        }

        Some(Self(merged))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// A coin set holding a single denomination
    pub fn single(denom: impl Into<String>, amount: u128) -> Self {
        Self::from(Coin::new(denom, amount))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// Check canonical form. Deserialized values bypass `new`, so anything
    /// arriving from outside must be checked before use.
    pub fn is_valid(&self) -> bool {
        let denoms_ok = self
            .0
            .iter()
            .all(|c| !c.denom.is_empty() && c.amount > 0 && c.denom.is_ascii());
        let sorted = self.0.windows(2).all(|w| w[0].denom < w[1].denom);
        denoms_ok && sorted
    }

    /// Amount held of a denomination (0 if absent)
    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    /// Add two coin sets, `None` on overflow
    pub fn checked_add(&self, other: &Coins) -> Option<Coins> {
        Coins::try_new(self.iter().chain(other.iter()).cloned().collect())
    }

    /// Subtract `other`, `None` if any denomination would go negative
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut out = self.0.clone();
        for coin in other.iter() {
            let existing = out.iter_mut().find(|c| c.denom == coin.denom)?;
            existing.amount = existing.amount.checked_sub(coin.amount)?;
        }
        out.retain(|c| c.amount > 0);
        Some(Coins(out))
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        if coin.amount == 0 {
            return Coins::empty();
        }
        Coins(vec![coin])
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
