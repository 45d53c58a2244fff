//! Subscription identifiers.

use alloy::primitives::{keccak256, B256, U256};

/// A numeric id left-padded to 32 bytes.
pub fn hex_id(id: u64) -> B256 {
    B256::from(U256::from(id).to_be_bytes::<32>())
}

/// A keccak-256 hash of an arbitrary string, e.g. a timestamp.
pub fn hash_id(seed: &str) -> B256 {
    keccak256(seed.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_id_padding() {
        let id = hex_id(1234);
        assert_eq!(
            id.to_string(),
            "0x00000000000000000000000000000000000000000000000000000000000004d2"
        );
    }

    #[test]
    fn test_hash_id() {
        assert_eq!(
            hash_id("").to_string(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}
