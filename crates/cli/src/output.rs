//! `merkle-root` and `merkle-proof`: load, build and render.

use allowlist_merkle::{Allowlist, Digest, ProofReport};
use serde::Serialize;

use crate::args::{InputArgs, ProofArgs, RootArgs};
use crate::CliError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RootReport {
    merkle_root: Digest,
    leaf_count: usize,
}

fn load(input: &InputArgs) -> Result<Allowlist, CliError> {
    tracing::info!(path = %input.data.display(), "loading allowlist");
    Ok(Allowlist::from_path(&input.data)?)
}

pub fn run_root(args: &RootArgs) -> Result<String, CliError> {
    let allowlist = load(&args.input)?;
    render_root(&allowlist, args.input.json)
}

pub fn run_proof(args: &ProofArgs) -> Result<String, CliError> {
    let allowlist = load(&args.input)?;
    let report = match &args.account {
        Some(account) => allowlist.proof_for_account(account)?,
        None => allowlist.proof(args.index.unwrap_or(0))?,
    };
    render_proof(&report, args.input.json)
}

pub fn render_root(allowlist: &Allowlist, json: bool) -> Result<String, CliError> {
    if json {
        let report = RootReport {
            merkle_root: allowlist.root(),
            leaf_count: allowlist.len(),
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(format!("merkleRoot {}", allowlist.root()))
}

pub fn render_proof(report: &ProofReport, json: bool) -> Result<String, CliError> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    Ok(format!(
        "merkleRoot {}\nproof {}",
        report.root,
        serde_json::to_string_pretty(&report.proof)?
    ))
}
