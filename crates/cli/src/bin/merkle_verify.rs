//! Check a membership proof against a root.

use std::process::ExitCode;

use allowlist_cli::{finish, init_tracing, run_verify, VerifyArgs};
use clap::Parser;

fn main() -> ExitCode {
    let args = VerifyArgs::parse();
    init_tracing("warn");
    finish(run_verify(&args))
}
