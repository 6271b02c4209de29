//! Store key layout
//!
//! Every key is `prefix || fields`. Integer fields are 8 bytes, big-endian,
//! with the sign bit flipped, so byte order matches numeric order for all
//! `i64` values (negative maturity times included). Each index kind has its
//! own single-byte prefix so prefix scans never overlap.
//!
//! | prefix | key                              | value          |
//! |--------|----------------------------------|----------------|
//! | 0x01   | symbol                           | token record   |
//! | 0x02   | -                                | next sequence  |
//! | 0x03   | sequence                         | transfer       |
//! | 0x04   | matured_time, sequence           | sequence       |
//! | 0x05   | from address, sequence           | sequence       |
//! | 0x06   | to address, sequence             | sequence       |

use crate::types::{Address, ADDR_LEN};

pub const TOKEN_KEY_PREFIX: u8 = 0x01;
pub const SEQUENCE_KEY: u8 = 0x02;
pub const DELAYED_TRANSFER_PREFIX: u8 = 0x03;
pub const DELAYED_TRANSFER_MATURE_TIME_PREFIX: u8 = 0x04;
pub const DELAYED_TRANSFER_FROM_PREFIX: u8 = 0x05;
pub const DELAYED_TRANSFER_TO_PREFIX: u8 = 0x06;

/// Width of an encoded integer field
pub const INT_LEN: usize = 8;

/// Length of a by-time key: prefix, time, sequence
pub const MATURE_TIME_KEY_LEN: usize = 1 + INT_LEN + INT_LEN;

const SIGN_BIT: u64 = 1 << 63;

/// Order-preserving fixed-width encoding of an `i64`
pub fn encode_i64(value: i64) -> [u8; INT_LEN] {
    ((value as u64) ^ SIGN_BIT).to_be_bytes()
}

/// Inverse of [`encode_i64`]; `None` unless exactly 8 bytes
pub fn decode_i64(bytes: &[u8]) -> Option<i64> {
    let array: [u8; INT_LEN] = bytes.try_into().ok()?;
    Some((u64::from_be_bytes(array) ^ SIGN_BIT) as i64)
}

pub fn token_key(symbol: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + symbol.len());
    key.push(TOKEN_KEY_PREFIX);
    key.extend_from_slice(symbol.as_bytes());
    key
}

pub fn sequence_key() -> Vec<u8> {
    vec![SEQUENCE_KEY]
}

pub fn delayed_transfer_key(sequence: i64) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + INT_LEN);
    key.push(DELAYED_TRANSFER_PREFIX);
    key.extend_from_slice(&encode_i64(sequence));
    key
}

pub fn mature_time_key(matured_time: i64, sequence: i64) -> Vec<u8> {
    let mut key = Vec::with_capacity(MATURE_TIME_KEY_LEN);
    key.push(DELAYED_TRANSFER_MATURE_TIME_PREFIX);
    key.extend_from_slice(&encode_i64(matured_time));
    key.extend_from_slice(&encode_i64(sequence));
    key
}

/// Split a by-time key into `(matured_time, sequence)`
pub fn decode_mature_time_key(key: &[u8]) -> Option<(i64, i64)> {
    if key.len() != MATURE_TIME_KEY_LEN || key[0] != DELAYED_TRANSFER_MATURE_TIME_PREFIX {
        return None;
    }
    let time = decode_i64(&key[1..1 + INT_LEN])?;
    let sequence = decode_i64(&key[1 + INT_LEN..])?;
    Some((time, sequence))
}

pub fn from_prefix(from: &Address) -> Vec<u8> {
    address_prefix(DELAYED_TRANSFER_FROM_PREFIX, from)
}

pub fn from_key(from: &Address, sequence: i64) -> Vec<u8> {
    let mut key = from_prefix(from);
    key.extend_from_slice(&encode_i64(sequence));
    key
}

pub fn to_prefix(to: &Address) -> Vec<u8> {
    address_prefix(DELAYED_TRANSFER_TO_PREFIX, to)
}

pub fn to_key(to: &Address, sequence: i64) -> Vec<u8> {
    let mut key = to_prefix(to);
    key.extend_from_slice(&encode_i64(sequence));
    key
}

fn address_prefix(prefix: u8, addr: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + ADDR_LEN + INT_LEN);
    key.push(prefix);
    key.extend_from_slice(addr.as_bytes());
    key
}
