//! Error types for allowlist encoding, tree construction and loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::digest::Account;

/// Errors raised while turning raw input into typed entries or leaves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("account must be exactly 20 bytes, got {actual}")]
    AccountLength { actual: usize },
    #[error("account must be a 0x-prefixed hex string: {0:?}")]
    AccountPrefix(String),
    #[error("account {0} fails EIP-55 checksum validation")]
    AccountChecksum(String),
    #[error("digest must be exactly 32 bytes, got {actual}")]
    DigestLength { actual: usize },
    #[error("invalid hex: {0}")]
    Hex(String),
    #[error("limit does not fit in 256 bits")]
    LimitOverflow,
    #[error("invalid limit {0:?}: expected a decimal or 0x-prefixed hex integer")]
    InvalidLimit(String),
}

impl From<hex::FromHexError> for EncodingError {
    fn from(err: hex::FromHexError) -> Self {
        EncodingError::Hex(err.to_string())
    }
}

/// Errors raised while building a tree or deriving proofs from it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("cannot build a Merkle tree from zero leaves")]
    EmptyInput,
    #[error("leaf index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },
    #[error("leaf {0} is not part of the tree")]
    LeafNotFound(String),
    #[error("leaf occurs more than once (indices {first} and {second}); address it by index")]
    DuplicateLeaf { first: usize, second: usize },
}

/// Errors raised by the [`Allowlist`](crate::Allowlist) facade and loaders.
#[derive(Error, Debug)]
pub enum AllowlistError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed allowlist JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: EncodingError,
    },
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
    #[error("account {0} is not in the allowlist")]
    UnknownAccount(Account),
    #[error("account {account} is listed more than once (indices {indices:?}); address it by index")]
    DuplicateAccount {
        account: Account,
        indices: Vec<usize>,
    },
}
