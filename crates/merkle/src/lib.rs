//! Merkle commitments over account allowlists.
//!
//! This crate provides:
//! - `LeafEncoder`: `keccak256(account ‖ uint256 limit)` leaf digests
//! - `MerkleTree`: sorted-pair tree construction with odd-node carry
//! - `MerkleProof`: sibling paths and standalone verification
//! - `Allowlist`: JSON entries → leaves → tree → per-entry proof reports

pub mod allowlist;
pub mod digest;
pub mod entry;
pub mod error;
pub mod hash;
pub mod leaf;
pub mod proof;
pub mod tree;

#[cfg(test)]
mod tests;

pub use allowlist::{Allowlist, ProofReport};
pub use digest::{Account, Digest, Limit};
pub use entry::{load_entries, parse_entries, AllowlistRecord, Entry, LimitValue};
pub use error::{AllowlistError, EncodingError, MerkleError};
pub use hash::{keccak256, Keccak256, MerkleHasher};
pub use leaf::{encode_leaf, encode_packed, LeafEncoder};
pub use proof::{compute_root, verify_proof, MerkleProof};
pub use tree::{MerkleTree, TreeConfig};
