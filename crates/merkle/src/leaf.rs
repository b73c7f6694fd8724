//! Leaf encoding: `hash(account ‖ limit)` over a fixed-width packed preimage.
//!
//! The preimage is the 20 raw account bytes followed by the limit as a 32-byte
//! big-endian integer, with no length prefixes or padding between them. This
//! is the layout an EVM contract gets from `abi.encodePacked(address, uint256)`.

use crate::digest::{Account, Digest, Limit};
use crate::entry::Entry;
use crate::error::EncodingError;
use crate::hash::{Keccak256, MerkleHasher};

/// Length of the packed `account ‖ limit` preimage.
pub const PACKED_LEN: usize = Account::LEN + 32;

/// Packs `account ‖ limit_be32`.
pub fn encode_packed(account: &Account, limit: &Limit) -> [u8; PACKED_LEN] {
    let mut out = [0u8; PACKED_LEN];
    out[..Account::LEN].copy_from_slice(account.as_bytes());
    out[Account::LEN..].copy_from_slice(&limit.to_be_bytes());
    out
}

/// Encode a leaf with Keccak-256 from an untyped account slice.
pub fn encode_leaf(account: &[u8], limit: &Limit) -> Result<Digest, EncodingError> {
    LeafEncoder::keccak().encode(account, limit)
}

/// Hashes allowlist entries into leaf digests.
#[derive(Clone, Debug, Default)]
pub struct LeafEncoder<H: MerkleHasher = Keccak256> {
    hasher: H,
}

impl LeafEncoder<Keccak256> {
    pub fn keccak() -> Self {
        Self::new(Keccak256)
    }
}

impl<H: MerkleHasher> LeafEncoder<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// Encode a raw account and limit.
    ///
    /// Fails if `account` is not exactly 20 bytes. Limits are range-checked
    /// when the [`Limit`] is constructed.
    pub fn encode(&self, account: &[u8], limit: &Limit) -> Result<Digest, EncodingError> {
        let account = Account::try_from(account)?;
        Ok(self.encode_account(&account, limit))
    }

    /// Encode a raw account and a big-endian limit of arbitrary width.
    pub fn encode_be(&self, account: &[u8], limit_be: &[u8]) -> Result<Digest, EncodingError> {
        let limit = Limit::from_be_bytes(limit_be)?;
        self.encode(account, &limit)
    }

    pub fn encode_account(&self, account: &Account, limit: &Limit) -> Digest {
        self.hasher.hash(&encode_packed(account, limit))
    }

    pub fn encode_entry(&self, entry: &Entry) -> Digest {
        self.encode_account(&entry.account, &entry.limit)
    }

    pub fn encode_all(&self, entries: &[Entry]) -> Vec<Digest> {
        entries.iter().map(|entry| self.encode_entry(entry)).collect()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::keccak256;

    fn account() -> Account {
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap()
    }

    #[test]
    fn test_packed_layout() {
        let packed = encode_packed(&account(), &Limit::from(100u64));
        assert_eq!(packed.len(), 52);
        assert_eq!(&packed[..20], account().as_bytes());
        assert!(packed[20..51].iter().all(|b| *b == 0));
        assert_eq!(packed[51], 100);
    }

    #[test]
    fn test_known_leaf() {
        let leaf = encode_leaf(account().as_bytes(), &Limit::from(100u64)).unwrap();
        assert_eq!(
            leaf.to_hex(),
            "0xc8224a494982e4eafa93ad0c81c9945d5489718a092793c1d803ac7493126774"
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let encoder = LeafEncoder::keccak();
        let limit = Limit::from(42u64);
        assert_eq!(
            encoder.encode_account(&account(), &limit),
            encoder.encode_account(&account(), &limit)
        );
        assert_eq!(
            encoder.encode_account(&account(), &limit),
            keccak256(&encode_packed(&account(), &limit))
        );
    }

    #[test]
    fn test_rejects_19_byte_account() {
        let err = encode_leaf(&[0u8; 19], &Limit::from(1u64)).unwrap_err();
        assert_eq!(err, EncodingError::AccountLength { actual: 19 });
    }

    #[test]
    fn test_rejects_limit_of_two_pow_256() {
        let mut two_pow_256 = vec![0u8; 33];
        two_pow_256[0] = 1;
        let err = LeafEncoder::keccak()
            .encode_be(account().as_bytes(), &two_pow_256)
            .unwrap_err();
        assert_eq!(err, EncodingError::LimitOverflow);
    }

    #[test]
    fn test_accepts_max_limit() {
        let max = [0xffu8; 32];
        assert!(LeafEncoder::keccak()
            .encode_be(account().as_bytes(), &max)
            .is_ok());
    }

    #[test]
    fn test_distinct_limits_distinct_leaves() {
        let encoder = LeafEncoder::keccak();
        assert_ne!(
            encoder.encode_account(&account(), &Limit::from(1u64)),
            encoder.encode_account(&account(), &Limit::from(2u64))
        );
    }
}
