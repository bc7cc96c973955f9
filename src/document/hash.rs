//! Fixed-key content hashing

/// Changing the key changes every exported hash
const HASH_KEY: [u8; 32] = *b"codegraph-document-hash-key-v1!!";

/// First 8 bytes (little-endian) of the keyed blake3 hash of `content`
pub fn content_hash(content: &str) -> u64 {
    let hash = blake3::keyed_hash(&HASH_KEY, content.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_stable_and_keyed() {
        assert_eq!(content_hash("type A struct{}"), content_hash("type A struct{}"));
        assert_ne!(content_hash("a"), content_hash("b"));

        let plain = blake3::hash(b"a");
        let mut head = [0u8; 8];
        head.copy_from_slice(&plain.as_bytes()[..8]);
        assert_ne!(content_hash("a"), u64::from_le_bytes(head));
    }
}
