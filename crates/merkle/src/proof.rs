//! Membership proofs: generation from a built tree and standalone verification.

use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::error::MerkleError;
use crate::hash::{Keccak256, MerkleHasher};
use crate::tree::MerkleTree;

/// Sibling digests from the leaf layer upward.
///
/// Layers where the path node was a carried-up odd digest contribute
/// nothing, so a proof can be shorter than the tree depth.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    siblings: Vec<Digest>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<Digest>) -> Self {
        Self { siblings }
    }

    pub fn siblings(&self) -> &[Digest] {
        &self.siblings
    }

    pub fn into_siblings(self) -> Vec<Digest> {
        self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.siblings.iter().map(Digest::to_hex).collect()
    }

    /// Verify with Keccak-256.
    pub fn verify(&self, leaf: &Digest, root: &Digest) -> bool {
        self.verify_with(&Keccak256, leaf, root)
    }

    pub fn verify_with<H: MerkleHasher>(&self, hasher: &H, leaf: &Digest, root: &Digest) -> bool {
        verify_proof(hasher, leaf, &self.siblings, root)
    }
}

impl From<Vec<Digest>> for MerkleProof {
    fn from(siblings: Vec<Digest>) -> Self {
        Self::new(siblings)
    }
}

/// Fold `siblings` into `leaf` with sorted-pair hashing and compare against
/// `root`. A mismatch is `false`, never an error.
pub fn verify_proof<H: MerkleHasher>(
    hasher: &H,
    leaf: &Digest,
    siblings: &[Digest],
    root: &Digest,
) -> bool {
    compute_root(hasher, leaf, siblings) == *root
}

/// The root implied by `leaf` and `siblings`.
pub fn compute_root<H: MerkleHasher>(hasher: &H, leaf: &Digest, siblings: &[Digest]) -> Digest {
    siblings
        .iter()
        .fold(*leaf, |current, sibling| hasher.hash_pair(&current, sibling))
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Proof for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<MerkleProof, MerkleError> {
        if index >= self.leaf_count() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count(),
            });
        }

        let layers = self.layers();
        let mut siblings = Vec::with_capacity(self.depth());
        let mut position = index;
        for layer in &layers[..layers.len() - 1] {
            // position ^ 1 is past the end only for a carried-up node
            if let Some(sibling) = layer.get(position ^ 1) {
                siblings.push(*sibling);
            }
            position /= 2;
        }

        Ok(MerkleProof::new(siblings))
    }

    /// Proof for a leaf identified by digest. Fails if the digest is absent
    /// or appears more than once; use [`MerkleTree::proof`] for duplicates.
    pub fn proof_for_leaf(&self, leaf: &Digest) -> Result<MerkleProof, MerkleError> {
        self.proof(self.position_of(leaf)?)
    }

    /// Check `proof` for `leaf` against this tree's root.
    pub fn verify(&self, leaf: &Digest, proof: &MerkleProof) -> bool {
        proof.verify_with(self.hasher(), leaf, &self.root())
    }
}
