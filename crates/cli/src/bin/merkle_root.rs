//! Print the Merkle root of an allowlist.

use std::process::ExitCode;

use allowlist_cli::{finish, init_tracing, run_root, RootArgs};
use clap::Parser;

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_tracing("warn");
    finish(run_root(&args))
}
