//! Cross-module properties of the tree and proof protocol.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::digest::Digest;
use crate::hash::{Keccak256, MerkleHasher};
use crate::proof::{verify_proof, MerkleProof};
use crate::tree::{MerkleTree, TreeConfig};

fn random_leaves(rng: &mut StdRng, n: usize) -> Vec<Digest> {
    (0..n).map(|_| Digest::new(rng.gen())).collect()
}

fn flip_bit(digest: &Digest, bit: usize) -> Digest {
    let mut bytes = digest.into_bytes();
    bytes[bit / 8] ^= 1 << (bit % 8);
    Digest::new(bytes)
}

/// A hasher unrelated to Keccak, to check the tree logic is hash-agnostic.
#[derive(Clone, Copy)]
struct XorFold;

impl MerkleHasher for XorFold {
    fn hash(&self, data: &[u8]) -> Digest {
        let mut out = [0u8; 32];
        for (i, byte) in data.iter().enumerate() {
            out[i % 32] = out[i % 32].rotate_left(3) ^ byte ^ (i as u8);
        }
        Digest::new(out)
    }
}

/// Every leaf of every tree size up to 70 yields a verifying proof.
#[test]
fn test_completeness_all_sizes() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 1..=70 {
        let leaves = random_leaves(&mut rng, n);
        let tree = MerkleTree::build(leaves.clone()).unwrap();
        for (i, leaf) in leaves.iter().enumerate() {
            let proof = tree.proof(i).unwrap();
            assert!(
                verify_proof(&Keccak256, leaf, proof.siblings(), &tree.root()),
                "leaf {i} of {n} failed to verify"
            );
            assert!(proof.len() <= tree.depth());
        }
    }
}

#[test]
fn test_determinism() {
    let mut rng = StdRng::seed_from_u64(7);
    let leaves = random_leaves(&mut rng, 257);

    let first = MerkleTree::build(leaves.clone()).unwrap();
    let second = MerkleTree::build(leaves).unwrap();
    assert_eq!(first.root(), second.root());
    assert_eq!(first.layers(), second.layers());
}

#[test]
fn test_tampered_leaf_fails() {
    let mut rng = StdRng::seed_from_u64(1);
    let leaves = random_leaves(&mut rng, 13);
    let tree = MerkleTree::build(leaves.clone()).unwrap();
    let proof = tree.proof(6).unwrap();

    for bit in 0..256 {
        let tampered = flip_bit(&leaves[6], bit);
        assert!(!proof.verify(&tampered, &tree.root()), "bit {bit}");
    }
}

#[test]
fn test_tampered_proof_element_fails() {
    let mut rng = StdRng::seed_from_u64(2);
    let leaves = random_leaves(&mut rng, 13);
    let tree = MerkleTree::build(leaves.clone()).unwrap();
    let proof = tree.proof(9).unwrap();

    for position in 0..proof.len() {
        for bit in (0..256).step_by(17) {
            let mut siblings = proof.siblings().to_vec();
            siblings[position] = flip_bit(&siblings[position], bit);
            let tampered = MerkleProof::new(siblings);
            assert!(!tampered.verify(&leaves[9], &tree.root()));
        }
    }
}

#[test]
fn test_truncated_or_extended_proof_fails() {
    let mut rng = StdRng::seed_from_u64(3);
    let leaves = random_leaves(&mut rng, 8);
    let tree = MerkleTree::build(leaves.clone()).unwrap();
    let proof = tree.proof(0).unwrap();

    let mut short = proof.siblings().to_vec();
    short.pop();
    assert!(!MerkleProof::new(short).verify(&leaves[0], &tree.root()));

    let mut long = proof.siblings().to_vec();
    long.push(leaves[1]);
    assert!(!MerkleProof::new(long).verify(&leaves[0], &tree.root()));
}

#[test]
fn test_swapping_across_pairs_changes_root() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..20 {
        let n = rng.gen_range(3..50);
        let leaves = random_leaves(&mut rng, n);
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        if i / 2 == j / 2 {
            continue;
        }
        let mut swapped = leaves.clone();
        swapped.swap(i, j);

        assert_ne!(
            MerkleTree::build(leaves).unwrap().root(),
            MerkleTree::build(swapped).unwrap().root(),
            "swap {i} <-> {j} of {n}"
        );
    }
}

#[test]
fn test_custom_hasher() {
    let mut rng = StdRng::seed_from_u64(5);
    let leaves = random_leaves(&mut rng, 9);
    let tree = MerkleTree::build_with(leaves.clone(), XorFold, &TreeConfig::default()).unwrap();
    let keccak_tree = MerkleTree::build(leaves.clone()).unwrap();

    assert_ne!(tree.root(), keccak_tree.root());
    for (i, leaf) in leaves.iter().enumerate() {
        let proof = tree.proof(i).unwrap();
        assert!(proof.verify_with(&XorFold, leaf, &tree.root()));
        assert!(tree.verify(leaf, &proof));
    }
}

#[test]
fn test_large_tree_parallel_layers() {
    let mut rng = StdRng::seed_from_u64(6);
    let leaves = random_leaves(&mut rng, 5_000);
    let config = TreeConfig::default().with_parallel_threshold(64);
    let tree = MerkleTree::build_with(leaves.clone(), Keccak256, &config).unwrap();

    assert_eq!(tree.root(), MerkleTree::build(leaves.clone()).unwrap().root());
    for i in [0, 1, 2_499, 4_998, 4_999] {
        assert!(tree.verify(&leaves[i], &tree.proof(i).unwrap()));
    }
}
