//! Print the Merkle root of an allowlist and the proof for one entry.

use std::process::ExitCode;

use allowlist_cli::{finish, init_tracing, run_proof, ProofArgs};
use clap::Parser;

fn main() -> ExitCode {
    let args = ProofArgs::parse();
    init_tracing("warn");
    finish(run_proof(&args))
}
