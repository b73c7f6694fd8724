//! Standalone proof verification for `merkle-verify`.

use allowlist_merkle::{Entry, LeafEncoder, Limit, MerkleProof};

use crate::args::VerifyArgs;
use crate::CliError;

/// Check the proof and return a one-line verdict.
///
/// A proof that does not verify is reported as [`CliError::InvalidProof`] so
/// the process exits non-zero.
pub fn run_verify(args: &VerifyArgs) -> Result<String, CliError> {
    let leaf = match (&args.leaf, &args.account, &args.limit) {
        (Some(leaf), _, _) => *leaf,
        (None, Some(account), Some(limit)) => {
            let entry = Entry::new(*account, limit.parse::<Limit>()?);
            LeafEncoder::keccak().encode_entry(&entry)
        }
        _ => return Err(CliError::MissingLeaf),
    };

    let proof = MerkleProof::new(args.proof.clone());
    tracing::debug!(%leaf, siblings = proof.len(), "verifying proof");

    if proof.verify(&leaf, &args.root) {
        Ok(format!("valid leaf {leaf} root {}", args.root))
    } else {
        Err(CliError::InvalidProof(args.root.to_hex()))
    }
}
