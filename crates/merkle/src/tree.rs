//! Layered Merkle tree with sorted-pair hashing and odd-node carry.
//!
//! Each layer is hashed left to right in consecutive pairs. The two digests
//! of a pair are sorted before hashing, so proofs carry no direction bits. If
//! a layer has an odd count, its last digest moves up unchanged.
//!
//! ```text
//! layer 2:            root
//!                    /    \
//! layer 1:      H(a,b)     c      <- c carried up
//!              /     \     |
//! layer 0:    a       b    c
//! ```

use crate::digest::Digest;
use crate::error::MerkleError;
use crate::hash::{Keccak256, MerkleHasher};

/// Construction settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Minimum number of pairs in a layer before it is hashed on the rayon
    /// pool. Ignored without the `parallel` feature.
    pub parallel_threshold: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 1024,
        }
    }
}

impl TreeConfig {
    /// Never hash in parallel.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    pub fn with_parallel_threshold(mut self, pairs: usize) -> Self {
        self.parallel_threshold = pairs;
        self
    }
}

/// An immutable Merkle tree retaining every layer.
///
/// `layers[0]` holds the leaves in caller order; the last layer holds the
/// root alone.
#[derive(Clone, Debug)]
pub struct MerkleTree<H: MerkleHasher = Keccak256> {
    layers: Vec<Vec<Digest>>,
    root: Digest,
    hasher: H,
}

impl MerkleTree<Keccak256> {
    /// Build with Keccak-256 and the default config.
    pub fn build(leaves: Vec<Digest>) -> Result<Self, MerkleError> {
        Self::build_with(leaves, Keccak256, &TreeConfig::default())
    }
}

impl<H: MerkleHasher> MerkleTree<H> {
    pub fn build_with(
        leaves: Vec<Digest>,
        hasher: H,
        config: &TreeConfig,
    ) -> Result<Self, MerkleError> {
        let Some(&first) = leaves.first() else {
            return Err(MerkleError::EmptyInput);
        };

        let mut layers = vec![leaves];
        let mut root = first;
        while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
            let next = next_layer(&hasher, current, config);
            root = next[0];
            layers.push(next);
        }

        tracing::trace!(
            leaves = layers[0].len(),
            depth = layers.len() - 1,
            %root,
            "built merkle tree"
        );

        Ok(Self {
            layers,
            root,
            hasher,
        })
    }

    pub fn root(&self) -> Digest {
        self.root
    }

    /// All layers, leaves first, root last.
    pub fn layers(&self) -> &[Vec<Digest>] {
        &self.layers
    }

    pub fn leaves(&self) -> &[Digest] {
        &self.layers[0]
    }

    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of layers above the leaves.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn leaf(&self, index: usize) -> Result<Digest, MerkleError> {
        self.leaves()
            .get(index)
            .copied()
            .ok_or(MerkleError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count(),
            })
    }

    /// Index of `leaf`, which must occur exactly once.
    pub fn position_of(&self, leaf: &Digest) -> Result<usize, MerkleError> {
        let mut hits = self
            .leaves()
            .iter()
            .enumerate()
            .filter(|(_, candidate)| *candidate == leaf)
            .map(|(index, _)| index);

        match (hits.next(), hits.next()) {
            (Some(index), None) => Ok(index),
            (Some(first), Some(second)) => Err(MerkleError::DuplicateLeaf { first, second }),
            (None, _) => Err(MerkleError::LeafNotFound(leaf.to_hex())),
        }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

/// Parent of one chunk: a hashed pair, or the carried-up odd digest.
fn parent<H: MerkleHasher>(hasher: &H, chunk: &[Digest]) -> Digest {
    match chunk {
        [left, right] => hasher.hash_pair(left, right),
        _ => chunk[0],
    }
}

fn sequential_layer<H: MerkleHasher>(hasher: &H, layer: &[Digest]) -> Vec<Digest> {
    layer.chunks(2).map(|chunk| parent(hasher, chunk)).collect()
}

#[cfg(feature = "parallel")]
fn next_layer<H: MerkleHasher>(hasher: &H, layer: &[Digest], config: &TreeConfig) -> Vec<Digest> {
    use rayon::prelude::*;

    if layer.len() / 2 >= config.parallel_threshold {
        layer
            .par_chunks(2)
            .map(|chunk| parent(hasher, chunk))
            .collect()
    } else {
        sequential_layer(hasher, layer)
    }
}

#[cfg(not(feature = "parallel"))]
fn next_layer<H: MerkleHasher>(hasher: &H, layer: &[Digest], _config: &TreeConfig) -> Vec<Digest> {
    sequential_layer(hasher, layer)
}
