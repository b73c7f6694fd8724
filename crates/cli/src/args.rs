//! Command-line arguments.

use std::path::PathBuf;

use allowlist_merkle::{Account, Digest};
use clap::{Args, Parser};

/// Where the allowlist lives unless `--data` says otherwise.
pub const DEFAULT_DATA_PATH: &str = "script/data/whitelist-data.json";

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// JSON array of { "account", "limit" } records
    #[arg(long, short = 'd', default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Print a JSON object instead of text
    #[arg(long)]
    pub json: bool,
}

/// Print the Merkle root of an allowlist.
#[derive(Parser, Debug, Clone)]
#[command(name = "merkle-root", version)]
pub struct RootArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Print the Merkle root of an allowlist and the proof for one entry.
#[derive(Parser, Debug, Clone)]
#[command(name = "merkle-proof", version)]
pub struct ProofArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Position of the entry to prove (defaults to the first)
    #[arg(long, short = 'i', conflicts_with = "account")]
    pub index: Option<usize>,

    /// Account to prove; must appear exactly once
    #[arg(long, short = 'a')]
    pub account: Option<Account>,
}

/// Check a proof against a root without the allowlist.
#[derive(Parser, Debug, Clone)]
#[command(name = "merkle-verify", version)]
pub struct VerifyArgs {
    /// Expected root
    #[arg(long, short = 'r')]
    pub root: Digest,

    /// Leaf digest; alternatively give --account and --limit
    #[arg(long, short = 'l', conflicts_with_all = ["account", "limit"])]
    pub leaf: Option<Digest>,

    #[arg(long, short = 'a', requires = "limit")]
    pub account: Option<Account>,

    /// Decimal or 0x-prefixed hex
    #[arg(long, requires = "account")]
    pub limit: Option<String>,

    /// Sibling digests, leaf layer first; repeat or comma-separate
    #[arg(long, short = 'p', value_delimiter = ',')]
    pub proof: Vec<Digest>,
}
