//! Shared plumbing for the allowlist command-line tools.
//!
//! Each binary parses its arguments, calls one `run_*` function here and
//! prints the returned text. Results go to stdout; logs and errors go to
//! stderr.

pub mod args;
pub mod output;
pub mod verify;

use std::error::Error as StdError;
use std::process::ExitCode;

use allowlist_merkle::{AllowlistError, EncodingError, MerkleError};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use args::{InputArgs, ProofArgs, RootArgs, VerifyArgs, DEFAULT_DATA_PATH};
pub use output::{run_proof, run_root};
pub use verify::run_verify;

/// Errors surfaced to the user by the CLI.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Allowlist(#[from] AllowlistError),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("either --leaf or both --account and --limit are required")]
    MissingLeaf,
    #[error("proof does not verify against root {0}")]
    InvalidProof(String),
}

/// Log to stderr, filtered by `RUST_LOG` or `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Print `result` or the error chain, and map it to an exit code.
pub fn finish(result: Result<String, CliError>) -> ExitCode {
    match result {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
