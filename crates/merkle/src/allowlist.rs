//! Entries, leaves and tree kept together for one committed allowlist.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::digest::{Account, Digest, Limit};
use crate::entry::{load_entries, parse_entries, Entry};
use crate::error::{AllowlistError, MerkleError};
use crate::hash::{Keccak256, MerkleHasher};
use crate::leaf::LeafEncoder;
use crate::proof::MerkleProof;
use crate::tree::{MerkleTree, TreeConfig};

/// Everything a caller needs to publish or check one entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofReport {
    pub index: usize,
    pub account: Account,
    pub limit: Limit,
    pub leaf: Digest,
    #[serde(rename = "merkleRoot")]
    pub root: Digest,
    pub proof: MerkleProof,
}

/// An ordered allowlist and its Merkle tree, built once.
#[derive(Clone, Debug)]
pub struct Allowlist<H: MerkleHasher = Keccak256> {
    entries: Vec<Entry>,
    tree: MerkleTree<H>,
}

impl Allowlist<Keccak256> {
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, AllowlistError> {
        Self::from_entries_with(entries, Keccak256, &TreeConfig::default())
    }

    pub fn from_json_str(json: &str) -> Result<Self, AllowlistError> {
        Self::from_entries(parse_entries(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AllowlistError> {
        Self::from_entries(load_entries(path)?)
    }
}

impl<H: MerkleHasher + Clone> Allowlist<H> {
    /// Encode leaves with `hasher` and build the tree with the same hasher.
    pub fn from_entries_with(
        entries: Vec<Entry>,
        hasher: H,
        config: &TreeConfig,
    ) -> Result<Self, AllowlistError> {
        let leaves = LeafEncoder::new(hasher.clone()).encode_all(&entries);
        let tree = MerkleTree::build_with(leaves, hasher, config)?;
        let allowlist = Self { entries, tree };

        for (account, indices) in allowlist.duplicate_accounts() {
            tracing::warn!(%account, ?indices, "account listed more than once");
        }
        tracing::debug!(
            entries = allowlist.len(),
            root = %allowlist.root(),
            "built allowlist tree"
        );

        Ok(allowlist)
    }
}

impl<H: MerkleHasher> Allowlist<H> {
    pub fn root(&self) -> Digest {
        self.tree.root()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tree(&self) -> &MerkleTree<H> {
        &self.tree
    }

    pub fn entry(&self, index: usize) -> Result<&Entry, MerkleError> {
        self.entries.get(index).ok_or(MerkleError::IndexOutOfRange {
            index,
            leaf_count: self.len(),
        })
    }

    pub fn leaf(&self, index: usize) -> Result<Digest, MerkleError> {
        self.tree.leaf(index)
    }

    pub fn proof(&self, index: usize) -> Result<ProofReport, MerkleError> {
        let entry = *self.entry(index)?;
        Ok(ProofReport {
            index,
            account: entry.account,
            limit: entry.limit,
            leaf: self.tree.leaf(index)?,
            root: self.root(),
            proof: self.tree.proof(index)?,
        })
    }

    /// Proof for an account that appears exactly once.
    pub fn proof_for_account(&self, account: &Account) -> Result<ProofReport, AllowlistError> {
        let indices = self.indices_of(account);
        match indices.as_slice() {
            [] => Err(AllowlistError::UnknownAccount(*account)),
            [index] => Ok(self.proof(*index)?),
            _ => Err(AllowlistError::DuplicateAccount {
                account: *account,
                indices,
            }),
        }
    }

    pub fn indices_of(&self, account: &Account) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.account == *account)
            .map(|(index, _)| index)
            .collect()
    }

    /// Accounts listed more than once, in order of first appearance.
    pub fn duplicate_accounts(&self) -> Vec<(Account, Vec<usize>)> {
        let mut seen: BTreeMap<Account, Vec<usize>> = BTreeMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            seen.entry(entry.account).or_default().push(index);
        }

        let mut duplicates: Vec<(Account, Vec<usize>)> = seen
            .into_iter()
            .filter(|(_, indices)| indices.len() > 1)
            .collect();
        duplicates.sort_by_key(|(_, indices)| indices[0]);
        duplicates
    }

    /// Check a proof for `entry` against this allowlist's root.
    pub fn verify_entry(&self, entry: &Entry, proof: &MerkleProof) -> bool {
        let leaf = LeafEncoder::new(self.tree.hasher()).encode_entry(entry);
        self.tree.verify(&leaf, proof)
    }
}
