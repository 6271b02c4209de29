//! Length-prefixed binary record codec
//!
//! Stored records are `len (u32, big-endian) || bincode body`. A record whose
//! prefix disagrees with the body length is treated as corrupted.

use crate::error::Fatal;
use serde::de::DeserializeOwned;
use serde::Serialize;

const LEN_PREFIX: usize = 4;

/// Encode a record for storage
pub fn encode_record<T: Serialize>(record: &T) -> Result<Vec<u8>, Fatal> {
    let body = bincode::serialize(record).map_err(|e| Fatal::Encode(e.to_string()))?;
    let len = u32::try_from(body.len())
        .map_err(|_| Fatal::Encode(format!("record of {} bytes is too large", body.len())))?;

    let mut bytes = Vec::with_capacity(LEN_PREFIX + body.len());
    bytes.extend_from_slice(&len.to_be_bytes());
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Decode a stored record; `key` is only used to report corruption
pub fn decode_record<T: DeserializeOwned>(key: &[u8], bytes: &[u8]) -> Result<T, Fatal> {
    let corrupted = |reason: String| Fatal::Decode {
        key: hex::encode(key),
        reason,
    };

    if bytes.len() < LEN_PREFIX {
        return Err(corrupted(format!("record of {} bytes has no length prefix", bytes.len())));
    }
    let (prefix, body) = bytes.split_at(LEN_PREFIX);
    let declared = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
    if declared != body.len() {
        return Err(corrupted(format!(
            "length prefix {} does not match body of {} bytes",
            declared,
            body.len()
        )));
    }

    bincode::deserialize(body).map_err(|e| corrupted(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Coin, Coins, DelayedTransfer, Token, ADDR_LEN, MAX_SUPPLY};
    use proptest::prelude::*;

    fn address() -> impl Strategy<Value = Address> {
        any::<[u8; ADDR_LEN]>().prop_map(Address::new)
    }

    fn coins() -> impl Strategy<Value = Coins> {
        proptest::collection::btree_map("[a-z]{1,10}", 1..=u128::MAX, 1..5).prop_map(|raw| {
            let coins = raw
                .into_iter()
                .map(|(denom, amount)| Coin::new(denom, amount))
                .collect();
            Coins::try_new(coins).unwrap()
        })
    }

    #[test]
    fn test_token_roundtrip() {
        let token = Token::new(
            "btc".to_string(),
            "bitcoin".to_string(),
            6,
            21_000_000_000_000,
            true,
            "bitcoin on barkisnet".to_string(),
            Address::derive(b"addr1"),
        );

        let bytes = encode_record(&token).unwrap();
        let decoded: Token = decode_record(b"k", &bytes).unwrap();
        assert_eq!(decoded, token);
    }

    #[test]
    fn test_delayed_transfer_roundtrip() {
        let transfer = DelayedTransfer::new(
            Address::derive(b"from"),
            Address::derive(b"to"),
            Coins::try_new(vec![Coin::new("btc", 100), Coin::new("eth", u128::MAX)]).unwrap(),
            -42,
            i64::MAX,
        );

        let bytes = encode_record(&transfer).unwrap();
        let decoded: DelayedTransfer = decode_record(b"k", &bytes).unwrap();
        assert_eq!(decoded, transfer);
    }

    #[test]
    fn test_corrupted_records_are_fatal() {
        let token_bytes = encode_record(&"btc".to_string()).unwrap();

        let truncated = &token_bytes[..token_bytes.len() - 1];
        assert!(matches!(
            decode_record::<String>(b"k", truncated),
            Err(Fatal::Decode { .. })
        ));

        assert!(matches!(
            decode_record::<String>(b"k", &[0, 0]),
            Err(Fatal::Decode { .. })
        ));

        // Valid prefix, garbage body
        let garbage = [0, 0, 0, 2, 0xff, 0xff];
        assert!(matches!(
            decode_record::<Token>(b"k", &garbage),
            Err(Fatal::Decode { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_token_roundtrip(
            symbol in "[a-z]{1,10}",
            name in "\\PC{1,32}",
            description in "\\PC{0,64}",
            decimal in any::<i8>(),
            total_supply in 1..=MAX_SUPPLY,
            mintable in any::<bool>(),
            owner in address(),
        ) {
            let token = Token::new(symbol, name, decimal, total_supply, mintable, description, owner);

            let bytes = encode_record(&token).unwrap();
            let decoded: Token = decode_record(b"k", &bytes).unwrap();
            prop_assert_eq!(decoded, token);
        }

        #[test]
        fn prop_delayed_transfer_roundtrip(
            from in address(),
            to in address(),
            amount in coins(),
            matured_time in any::<i64>(),
            sequence in any::<i64>(),
        ) {
            let transfer = DelayedTransfer::new(from, to, amount, matured_time, sequence);

            let bytes = encode_record(&transfer).unwrap();
            let decoded: DelayedTransfer = decode_record(b"k", &bytes).unwrap();
            prop_assert_eq!(decoded, transfer);
        }
    }
}
