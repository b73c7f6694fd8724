//! Request handlers.

use std::sync::Arc;

use allowlist_merkle::{Account, Digest, MerkleProof, ProofReport};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub leaf_count: usize,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RootResponse {
    pub merkle_root: Digest,
    pub leaf_count: usize,
}

#[derive(Deserialize, Debug)]
pub struct VerifyRequest {
    pub leaf: Digest,
    pub proof: MerkleProof,
    /// Defaults to the served root.
    pub root: Option<Digest>,
}

#[derive(Serialize, Debug)]
pub struct VerifyResponse {
    pub valid: bool,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        leaf_count: state.allowlist.len(),
    })
}

pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        merkle_root: state.allowlist.root(),
        leaf_count: state.allowlist.len(),
    })
}

pub async fn proof_by_index(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ProofReport>, ApiError> {
    Ok(Json(state.allowlist.proof(index)?))
}

pub async fn proof_by_account(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<Json<ProofReport>, ApiError> {
    let account: Account = account.parse()?;
    Ok(Json(state.allowlist.proof_for_account(&account)?))
}

pub async fn verify(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    let root = request.root.unwrap_or_else(|| state.allowlist.root());
    let valid = request.proof.verify(&request.leaf, &root);
    tracing::debug!(leaf = %request.leaf, %root, valid, "verify request");
    Json(VerifyResponse { valid })
}

#[cfg(test)]
mod tests {
    use super::*;
    use allowlist_merkle::{Allowlist, Entry};

    fn state() -> Arc<AppState> {
        let allowlist = Allowlist::from_entries(vec![
            Entry::parse("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed", "100").unwrap(),
            Entry::parse("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359", "250").unwrap(),
            Entry::parse("0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB", "1000000000000000000")
                .unwrap(),
        ])
        .unwrap();
        Arc::new(AppState { allowlist })
    }

    #[tokio::test]
    async fn test_root() {
        let Json(response) = root(State(state())).await;
        assert_eq!(
            response.merkle_root.to_hex(),
            "0xa8bd9c7bcfe2909243ff055e2ec4265ebe17582f4549458f43ca61c50f27e81f"
        );
        assert_eq!(response.leaf_count, 3);
    }

    #[tokio::test]
    async fn test_proof_roundtrip_through_verify() {
        let state = state();
        let Json(report) = proof_by_index(State(state.clone()), Path(1)).await.unwrap();

        let Json(response) = verify(
            State(state.clone()),
            Json(VerifyRequest {
                leaf: report.leaf,
                proof: report.proof.clone(),
                root: None,
            }),
        )
        .await;
        assert!(response.valid);

        let Json(response) = verify(
            State(state),
            Json(VerifyRequest {
                leaf: report.leaf,
                proof: report.proof,
                root: Some(Digest::new([0; 32])),
            }),
        )
        .await;
        assert!(!response.valid);
    }

    #[tokio::test]
    async fn test_proof_by_account() {
        let state = state();
        let Json(report) = proof_by_account(
            State(state),
            Path("0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(report.index, 1);
    }

    #[tokio::test]
    async fn test_proof_by_malformed_account() {
        let err = proof_by_account(State(state()), Path("0xnothex".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Encoding(_)));
    }
}
