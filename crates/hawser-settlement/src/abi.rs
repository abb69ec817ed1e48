//! Minimal ABI encoding for the escrow contract calls.
//!
//! Selectors are computed at runtime (first 4 bytes of Keccak-256 over
//! the function signature); arguments are packed into 32-byte words per
//! the standard ABI. Only the shapes the escrow contract needs are
//! implemented: static words and the two dynamic arrays of `release`.

use crate::error::EscrowError;
use sha3::{Digest, Keccak256};

/// 4-byte function selector for a canonical signature string.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Encode a `0x`-prefixed 20-byte address as a left-padded word.
pub fn encode_address(address: &str) -> Result<[u8; 32], EscrowError> {
    let body = address
        .strip_prefix("0x")
        .ok_or_else(|| EscrowError::InvalidAddress(address.to_string()))?;
    let bytes =
        hex::decode(body).map_err(|_| EscrowError::InvalidAddress(address.to_string()))?;
    if bytes.len() != 20 {
        return Err(EscrowError::InvalidAddress(address.to_string()));
    }

    let mut word = [0u8; 32];
    word[12..].copy_from_slice(&bytes);
    Ok(word)
}

/// Encode an unsigned integer as a big-endian word.
pub fn encode_u256(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// `selector ++ words` for a call with only static arguments.
pub fn encode_static_call(signature: &str, words: &[[u8; 32]]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + words.len() * 32);
    data.extend_from_slice(&selector(signature));
    for word in words {
        data.extend_from_slice(word);
    }
    data
}

/// Encode `release(bytes32,address[],uint256[])`.
///
/// Head: order key, then offsets to the two tails; tails: length-prefixed
/// element lists.
pub fn encode_release_call(
    order_key: [u8; 32],
    addresses: &[[u8; 32]],
    amounts: &[[u8; 32]],
) -> Vec<u8> {
    let n = addresses.len();
    debug_assert_eq!(n, amounts.len());

    let head_words = 3;
    let addresses_offset = head_words * 32;
    let amounts_offset = addresses_offset + 32 + n * 32;

    let mut data = Vec::with_capacity(4 + (head_words + 2 + 2 * n) * 32);
    data.extend_from_slice(&selector("release(bytes32,address[],uint256[])"));
    data.extend_from_slice(&order_key);
    data.extend_from_slice(&encode_u256(addresses_offset as u128));
    data.extend_from_slice(&encode_u256(amounts_offset as u128));
    data.extend_from_slice(&encode_u256(n as u128));
    for word in addresses {
        data.extend_from_slice(word);
    }
    data.extend_from_slice(&encode_u256(n as u128));
    for word in amounts {
        data.extend_from_slice(word);
    }
    data
}
