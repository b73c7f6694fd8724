//! API error type and its HTTP mapping.

use allowlist_merkle::{AllowlistError, EncodingError, MerkleError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
    #[error(transparent)]
    Allowlist(#[from] AllowlistError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Encoding(_) => StatusCode::BAD_REQUEST,
            ApiError::Merkle(err) => merkle_status(err),
            ApiError::Allowlist(err) => match err {
                AllowlistError::UnknownAccount(_) => StatusCode::NOT_FOUND,
                AllowlistError::DuplicateAccount { .. } => StatusCode::CONFLICT,
                AllowlistError::Encoding(_) | AllowlistError::Entry { .. } => {
                    StatusCode::BAD_REQUEST
                }
                AllowlistError::Merkle(err) => merkle_status(err),
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

fn merkle_status(err: &MerkleError) -> StatusCode {
    match err {
        MerkleError::IndexOutOfRange { .. } | MerkleError::LeafNotFound(_) => StatusCode::NOT_FOUND,
        MerkleError::DuplicateLeaf { .. } => StatusCode::CONFLICT,
        MerkleError::EmptyInput => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allowlist_merkle::Account;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(EncodingError::AccountLength { actual: 3 }).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(MerkleError::IndexOutOfRange {
                index: 9,
                leaf_count: 2
            })
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(AllowlistError::UnknownAccount(Account::new([0; 20]))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(AllowlistError::DuplicateAccount {
                account: Account::new([0; 20]),
                indices: vec![0, 1],
            })
            .status(),
            StatusCode::CONFLICT
        );
    }
}
