//! Token records
//!
//! A token is created by an issue message and afterwards only its
//! `total_supply` changes, through owner mints.

use crate::error::AssetError;
use crate::types::address::Address;
use crate::types::coin::{Coins, NATIVE_DENOM};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on any token's total supply.
///
/// Stays below `i64::MAX` (9,223,372,036,854,775,807) so `total_supply + mint`
/// cannot overflow once the mint amount is checked against the headroom.
pub const MAX_SUPPLY: i64 = 9_000_000_000_000_000_000;

/// Maximum token name length
pub const MAX_TOKEN_NAME_LEN: usize = 32;

/// Maximum token symbol length
pub const MAX_TOKEN_SYMBOL_LEN: usize = 10;

/// Maximum token description length
pub const MAX_TOKEN_DESCRIPTION_LEN: usize = 128;

/// A fungible token issued on chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Unique, lowercase symbol (also the coin denom)
    pub symbol: String,
    /// Human readable name
    pub name: String,
    /// Decimal places
    #[serde(rename = "decimals")]
    pub decimal: i8,
    /// Total amount in existence
    pub total_supply: i64,
    /// Whether the owner may mint more
    pub mintable: bool,
    pub description: String,
    /// Issuer, the only account allowed to mint
    pub owner: Address,
}

impl Token {
    pub fn new(
        symbol: String,
        name: String,
        decimal: i8,
        total_supply: i64,
        mintable: bool,
        description: String,
        owner: Address,
    ) -> Self {
        Self {
            symbol,
            name,
            decimal,
            total_supply,
            mintable,
            description,
            owner,
        }
    }

    /// Remaining supply that may still be minted, within `[0, MAX_SUPPLY]`
    pub fn mint_headroom(&self) -> i64 {
        MAX_SUPPLY
            .checked_sub(self.total_supply)
            .map_or(0, |headroom| headroom.clamp(0, MAX_SUPPLY))
    }

    /// `amount` of this token as a coin set
    pub fn coins(&self, amount: i64) -> Coins {
        Coins::single(self.symbol.clone(), u128::from(amount.unsigned_abs()))
    }

    /// Full validation of a stored token (genesis import)
    pub fn validate(&self) -> Result<(), AssetError> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        validate_symbol(&self.symbol)?;

        if self.symbol != self.symbol.to_lowercase() {
            return Err(AssetError::InvalidTokenSymbol(format!(
                "stored token symbol {} should be lowercase",
                self.symbol
            )));
        }

        if self.decimal < 0 {
            return Err(AssetError::InvalidDecimal(format!(
                "token decimal {} is negative",
                self.decimal
            )));
        }

        validate_total_supply(self.total_supply)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Token:")?;
        writeln!(f, "  Name:         {}", self.name)?;
        writeln!(f, "  Symbol:       {}", self.symbol)?;
        writeln!(f, "  Decimal:      {}", self.decimal)?;
        writeln!(f, "  Total Supply: {}", self.total_supply)?;
        writeln!(f, "  Mintable:     {}", self.mintable)?;
        writeln!(f, "  Owner:        {}", self.owner)?;
        write!(f, "  Description:  {}", self.description)
    }
}

// =============================================================================
// Field validation
// =============================================================================

pub(crate) fn validate_name(name: &str) -> Result<(), AssetError> {
    if name.is_empty() || name.len() > MAX_TOKEN_NAME_LEN {
        return Err(AssetError::InvalidTokenName(format!(
            "token name length should be in (0, {}]",
            MAX_TOKEN_NAME_LEN
        )));
    }
    if name == NATIVE_DENOM {
        return Err(AssetError::InvalidTokenName(format!(
            "token name should not be identical to native token {}",
            NATIVE_DENOM
        )));
    }
    Ok(())
}

/// Symbols are 1-10 ASCII letters and never the native denom (either case)
pub(crate) fn validate_symbol(symbol: &str) -> Result<(), AssetError> {
    if symbol.is_empty() || symbol.len() > MAX_TOKEN_SYMBOL_LEN {
        return Err(AssetError::InvalidTokenSymbol(format!(
            "token symbol length should be in (0, {}]",
            MAX_TOKEN_SYMBOL_LEN
        )));
    }
    if symbol.eq_ignore_ascii_case(NATIVE_DENOM) {
        return Err(AssetError::InvalidTokenSymbol(format!(
            "token symbol should not be identical to native token {}",
            NATIVE_DENOM
        )));
    }
    if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AssetError::InvalidTokenSymbol(
            "token symbol should only contain alphabet".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_description(description: &str) -> Result<(), AssetError> {
    if description.len() > MAX_TOKEN_DESCRIPTION_LEN {
        return Err(AssetError::InvalidTokenDescription(format!(
            "token description length {} should not exceed {}",
            description.len(),
            MAX_TOKEN_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

pub(crate) fn validate_total_supply(total_supply: i64) -> Result<(), AssetError> {
    if total_supply <= 0 || total_supply > MAX_SUPPLY {
        return Err(AssetError::InvalidTotalSupply(format!(
            "total supply should be in (0, {}]",
            MAX_SUPPLY
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_token() -> Token {
        Token::new(
            "btc".to_string(),
            "bitcoin".to_string(),
            6,
            21_000_000_000_000,
            true,
            "bitcoin on barkisnet".to_string(),
            Address::derive(b"addr1"),
        )
    }

    #[test]
    fn test_token_validation() {
        let token = create_test_token();
        assert!(token.validate().is_ok());
        assert_eq!(token.mint_headroom(), MAX_SUPPLY - 21_000_000_000_000);
        assert_eq!(token.coins(1000).amount_of("btc"), 1000);
    }

    #[test]
    fn test_invalid_tokens() {
        let mut token = create_test_token();
        token.symbol = "BTC".to_string();
        assert!(matches!(
            token.validate(),
            Err(AssetError::InvalidTokenSymbol(_))
        ));

        let mut token = create_test_token();
        token.decimal = -1;
        assert!(matches!(token.validate(), Err(AssetError::InvalidDecimal(_))));

        let mut token = create_test_token();
        token.total_supply = 0;
        assert!(matches!(
            token.validate(),
            Err(AssetError::InvalidTotalSupply(_))
        ));

        let mut token = create_test_token();
        token.name = String::new();
        assert!(matches!(
            token.validate(),
            Err(AssetError::InvalidTokenName(_))
        ));

        let mut token = create_test_token();
        token.description = "x".repeat(MAX_TOKEN_DESCRIPTION_LEN + 1);
        assert!(matches!(
            token.validate(),
            Err(AssetError::InvalidTokenDescription(_))
        ));
    }

    #[test]
    fn test_symbol_rules() {
        assert!(validate_symbol("btc").is_ok());
        assert!(validate_symbol("ETH").is_ok());
        assert!(validate_symbol("").is_err());
        assert!(validate_symbol("toolongsymbol").is_err());
        assert!(validate_symbol("btc1").is_err());
        assert!(validate_symbol("btc_123").is_err());
        assert!(validate_symbol("UBARKIS").is_err());
    }

    #[test]
    fn test_mint_headroom_never_overflows() {
        let mut token = create_test_token();

        token.total_supply = MAX_SUPPLY;
        assert_eq!(token.mint_headroom(), 0);

        token.total_supply = i64::MAX;
        assert_eq!(token.mint_headroom(), 0);

        token.total_supply = i64::MIN;
        assert_eq!(token.mint_headroom(), 0);

        token.total_supply = -5;
        assert_eq!(token.mint_headroom(), MAX_SUPPLY);
    }
}
