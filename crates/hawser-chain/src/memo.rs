//! Anchor memo format.
//!
//! The on-chain representation of an anchor is the UTF-8 string
//! `HAWSER:<anchor_id>:<payload_hash>`, written as transaction calldata
//! (EVM) or a comment payload (TON). Both halves are `0x`-prefixed
//! lowercase hex, so the memo is unambiguous to split.

use crate::types::AnchorId;
use hawser_canonical::PayloadHash;

/// Memo prefix identifying Hawser anchors.
pub const ANCHOR_PREFIX: &str = "HAWSER";

/// Render the memo for an anchor.
pub fn format_memo(anchor_id: &AnchorId, payload_hash: &PayloadHash) -> String {
    format!("{}:{}:{}", ANCHOR_PREFIX, anchor_id.to_hex(), payload_hash.to_hex())
}

/// Decode a memo back into its anchor id and payload hash.
///
/// Returns `None` for anything that is not a well-formed Hawser anchor
/// memo — foreign transactions simply fail verification.
pub fn parse_memo(memo: &str) -> Option<(AnchorId, PayloadHash)> {
    let rest = memo.strip_prefix(ANCHOR_PREFIX)?.strip_prefix(':')?;
    let (anchor_part, hash_part) = rest.split_once(':')?;

    let anchor_id = anchor_part.parse::<AnchorId>().ok()?;
    let payload_hash = hash_part.parse::<PayloadHash>().ok()?;
    Some((anchor_id, payload_hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hawser_canonical::hash_string;

    #[test]
    fn test_memo_roundtrip() {
        let anchor_id = AnchorId::from_hash(hash_string("a"));
        let payload_hash = hash_string("payload");

        let memo = format_memo(&anchor_id, &payload_hash);
        let (id, hash) = parse_memo(&memo).unwrap();

        assert_eq!(id, anchor_id);
        assert_eq!(hash, payload_hash);
    }

    #[test]
    fn test_parse_rejects_foreign_data() {
        assert!(parse_memo("").is_none());
        assert!(parse_memo("HAWSER:").is_none());
        assert!(parse_memo("OTHER:0xab:0xcd").is_none());
        assert!(parse_memo("HAWSER:nothex:alsonothex").is_none());
    }
}
