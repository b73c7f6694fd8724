//! Hashing strategy for leaves and internal nodes.
//!
//! Tree construction, proof generation and verification only ever see the
//! [`MerkleHasher`] trait, so any collision-resistant 32-byte hash can be
//! swapped in. [`Keccak256`] is the default and matches the EVM verifier.

use tiny_keccak::{Hasher, Keccak};

use crate::digest::Digest;

/// A pure hash function producing 32-byte digests.
pub trait MerkleHasher: Send + Sync {
    /// Hash arbitrary bytes.
    fn hash(&self, data: &[u8]) -> Digest;

    /// Hash two digests with the smaller one first.
    ///
    /// The result is symmetric in `a` and `b`, so a verifier only needs the
    /// sibling value and never a direction bit.
    fn hash_pair(&self, a: &Digest, b: &Digest) -> Digest {
        let (lo, hi) = sorted_pair(a, b);
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(lo.as_bytes());
        buf[32..].copy_from_slice(hi.as_bytes());
        self.hash(&buf)
    }
}

/// Ethereum Keccak-256 (the pre-standard SHA-3 padding).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keccak256;

impl MerkleHasher for Keccak256 {
    fn hash(&self, data: &[u8]) -> Digest {
        keccak256(data)
    }
}

impl<H: MerkleHasher + ?Sized> MerkleHasher for &H {
    fn hash(&self, data: &[u8]) -> Digest {
        (**self).hash(data)
    }
}

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Digest {
    let mut keccak = Keccak::v256();
    keccak.update(data);
    let mut out = [0u8; 32];
    keccak.finalize(&mut out);
    Digest::new(out)
}

/// Order two digests ascending by byte value.
pub fn sorted_pair<'a>(a: &'a Digest, b: &'a Digest) -> (&'a Digest, &'a Digest) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_known_vectors() {
        assert_eq!(
            keccak256(b"").to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(
            keccak256(b"abc").to_hex(),
            "0x4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }

    #[test]
    fn test_hash_pair_is_symmetric() {
        let a = keccak256(b"a");
        let b = keccak256(b"b");
        assert_eq!(Keccak256.hash_pair(&a, &b), Keccak256.hash_pair(&b, &a));
    }

    #[test]
    fn test_hash_pair_sorts_before_concatenating() {
        let a = keccak256(b"a");
        let b = keccak256(b"b");
        let (lo, hi) = sorted_pair(&a, &b);

        let mut concat = lo.as_bytes().to_vec();
        concat.extend_from_slice(hi.as_bytes());

        assert_eq!(Keccak256.hash_pair(&a, &b), keccak256(&concat));
    }

    #[test]
    fn test_sorted_pair_equal_inputs() {
        let a = keccak256(b"same");
        let (lo, hi) = sorted_pair(&a, &a);
        assert_eq!(lo, hi);
    }
}
